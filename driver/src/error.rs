use std::{io, path::PathBuf};

use crate::toolchain::ProcessError;

/// Why a single input file did not make it to a finished build.
///
/// None of these stop the remaining files from being processed.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum BuildError
{
    #[display(fmt = "input file not found: {}", "path.display()")]
    InputNotFound
    {
        path: PathBuf
    },

    #[display(fmt = "failed to create output directory {}: {}", "path.display()", source)]
    CreateOutDir
    {
        path: PathBuf, source: io::Error
    },

    /// Silent mode never prompts, so an existing output is left alone.
    #[display(
        fmt = "{} already exists, pass --force to replace it",
        "path.display()"
    )]
    OutputExists
    {
        path: PathBuf
    },

    #[display(fmt = "compilation failed for {}: {}", input, source)]
    CompilationFailed
    {
        input: String, source: ProcessError
    },

    #[display(fmt = "expected output file not found: {}", "path.display()")]
    ExpectedOutputMissing
    {
        path: PathBuf
    },

    #[display(fmt = "failed to read {}: {}", "path.display()", source)]
    Io
    {
        path: PathBuf, source: io::Error
    },

    #[display(fmt = "execution failed:\n{}", source)]
    ExecutionFailed
    {
        source: ProcessError
    },
}
