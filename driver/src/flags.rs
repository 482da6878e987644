use std::path::PathBuf;

use crate::SOURCE_EXTENSION;

/// Options recognized on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags
{
    /// Replace an existing output file without asking.
    pub force: bool,

    /// Only report errors, never prompt.
    pub silent: bool,

    /// Run the compiled script without asking.
    pub autorun: bool,

    pub out_dir: Option<PathBuf>,
    pub output_name: Option<String>,
}

/// What the command line asks the tool to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command
{
    /// No arguments were given at all.
    Hint,

    Help,

    Build
    {
        flags: Flags, inputs: Vec<String>
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ArgumentError
{
    #[display(fmt = "no input .ts files provided")]
    NoInputFiles,
}

/// Scans the raw tokens, left to right.
///
/// Unknown tokens are dropped, and `--outDir` / `--outputName` take the next
/// token whatever it looks like.
pub fn parse_arguments<I>(tokens: I) -> Result<Command, ArgumentError>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut tokens = tokens.into_iter().map(Into::<String>::into).peekable();

    if tokens.peek().is_none() {
        return Ok(Command::Hint);
    }

    let mut flags = Flags::default();
    let mut inputs = Vec::new();

    while let Some(token) = tokens.next() {
        match token.as_str() {
            "--help" => return Ok(Command::Help),
            "--force" => flags.force = true,
            "--silent" => flags.silent = true,
            "--autorun" => flags.autorun = true,
            "--outDir" => flags.out_dir = non_empty(tokens.next()).map(PathBuf::from),
            "--outputName" => flags.output_name = non_empty(tokens.next()),
            _ if is_source_file(&token) => inputs.push(token),
            _ => log::trace!("Ignoring argument `{token}`"),
        }
    }

    if inputs.is_empty() {
        return Err(ArgumentError::NoInputFiles);
    }

    Ok(Command::Build { flags, inputs })
}

fn non_empty(value: Option<String>) -> Option<String>
{
    value.filter(|value| !value.is_empty())
}

fn is_source_file(token: &str) -> bool
{
    token
        .strip_suffix(SOURCE_EXTENSION)
        .is_some_and(|rest| rest.ends_with('.'))
}
