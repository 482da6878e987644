use owo_colors::OwoColorize;

pub static USAGE: &str = "usage:
  tsb <file.ts> [options]

options:
  --help         Show this help message
  --force        Overwrite existing output file without prompt
  --silent       No logs or prompts unless error
  --outDir       Specify output directory for compiled .js
  --outputName   Set output .js filename
  --autorun      Run compiled .js automatically after build without prompt

environment:
  TSB_COMPILER   Compiler to invoke (default: tsc)
  TSB_RUNTIME    Runtime used to run the output (default: node)
  TSB_LOG        Log level: off, error, warn, info, debug or trace

examples:
  tsb src/app.ts --force
  tsb main.ts --outDir dist --autorun
  tsb code.ts --outputName built.js";

pub fn print_usage()
{
    println!();
    println!("{}", "tsb - simple typescript build tool".cyan());
    println!();
    println!("{USAGE}");
}

pub fn print_hint()
{
    println!(
        "Hello! Looks like you ran the file with no arguments. If you're confused on how this works, run {}.",
        "tsb --help".cyan()
    );
}
