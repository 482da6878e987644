use std::{
    env,
    ffi::OsStr,
    io,
    path::Path,
    process::{self, ExitStatus},
};

pub const COMPILER_VAR: &str = "TSB_COMPILER";
pub const RUNTIME_VAR: &str = "TSB_RUNTIME";

pub const DEFAULT_COMPILER: &str = if cfg!(windows) { "tsc.cmd" } else { "tsc" };
pub const DEFAULT_RUNTIME: &str = "node";

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ProcessError
{
    #[display(fmt = "failed to start {}: {}", program, source)]
    Spawn
    {
        program: String, source: io::Error
    },

    #[display(fmt = "{} exited with {}", program, status)]
    Exit
    {
        program: String, status: ExitStatus
    },
}

/// A single compiler invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileJob<'a>
{
    pub input: &'a Path,
    pub out_dir: Option<&'a Path>,
}

impl CompileJob<'_>
{
    pub fn arguments(&self) -> Vec<&OsStr>
    {
        let mut arguments = vec![self.input.as_os_str()];

        if let Some(out_dir) = self.out_dir {
            arguments.push(OsStr::new("--outDir"));
            arguments.push(out_dir.as_os_str());
        }

        arguments
    }
}

/// The external programs the driver delegates to.
///
/// Both calls block until the child exits.
pub trait Toolchain
{
    /// Name of the compiler, for progress messages.
    fn compiler_name(&self) -> &str;

    fn compile(
        &mut self,
        job: &CompileJob<'_>,
    ) -> Result<(), ProcessError>;

    fn execute(
        &mut self,
        artifact: &Path,
    ) -> Result<(), ProcessError>;
}

/// Spawns real processes that share this process' standard streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalToolchain
{
    pub compiler: String,
    pub runtime: String,
}

impl Default for ExternalToolchain
{
    fn default() -> Self
    {
        Self {
            compiler: DEFAULT_COMPILER.to_string(),
            runtime: DEFAULT_RUNTIME.to_string(),
        }
    }
}

impl ExternalToolchain
{
    /// Reads `TSB_COMPILER` and `TSB_RUNTIME`, falling back to `tsc` and `node`.
    pub fn from_env() -> Self
    {
        Self::from_overrides(env::var(COMPILER_VAR).ok(), env::var(RUNTIME_VAR).ok())
    }

    pub fn from_overrides(
        compiler: Option<String>,
        runtime: Option<String>,
    ) -> Self
    {
        let defaults = Self::default();

        Self {
            compiler: compiler
                .filter(|value| !value.is_empty())
                .unwrap_or(defaults.compiler),
            runtime: runtime
                .filter(|value| !value.is_empty())
                .unwrap_or(defaults.runtime),
        }
    }
}

impl Toolchain for ExternalToolchain
{
    fn compiler_name(&self) -> &str
    {
        &self.compiler
    }

    fn compile(
        &mut self,
        job: &CompileJob<'_>,
    ) -> Result<(), ProcessError>
    {
        spawn_and_wait(&self.compiler, &job.arguments())
    }

    fn execute(
        &mut self,
        artifact: &Path,
    ) -> Result<(), ProcessError>
    {
        spawn_and_wait(&self.runtime, &[artifact.as_os_str()])
    }
}

fn spawn_and_wait(
    program: &str,
    arguments: &[&OsStr],
) -> Result<(), ProcessError>
{
    log::debug!("Running `{program}` with {arguments:?}");

    let status = process::Command::new(program)
        .args(arguments)
        .status()
        .map_err(|source| ProcessError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(ProcessError::Exit {
            program: program.to_string(),
            status,
        })
    }
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn compiler_gets_out_dir_only_when_overridden()
    {
        let input = Path::new("/src/app.ts");
        let out_dir = Path::new("/dist");

        assert_eq!(
            CompileJob {
                input,
                out_dir: None
            }
            .arguments(),
            vec![OsStr::new("/src/app.ts")]
        );

        assert_eq!(
            CompileJob {
                input,
                out_dir: Some(out_dir)
            }
            .arguments(),
            vec![
                OsStr::new("/src/app.ts"),
                OsStr::new("--outDir"),
                OsStr::new("/dist")
            ]
        );
    }

    #[test]
    fn empty_overrides_fall_back_to_defaults()
    {
        assert_eq!(
            ExternalToolchain::from_overrides(Some(String::new()), None),
            ExternalToolchain::default()
        );

        let toolchain =
            ExternalToolchain::from_overrides(Some("swc".to_string()), Some("deno".to_string()));

        assert_eq!(toolchain.compiler, "swc");
        assert_eq!(toolchain.runtime, "deno");
    }

    #[test]
    fn missing_program_is_a_spawn_error()
    {
        let mut toolchain = ExternalToolchain {
            compiler: "tsb-definitely-not-installed".to_string(),
            runtime: "tsb-definitely-not-installed".to_string(),
        };

        let error = toolchain.execute(Path::new("app.js")).unwrap_err();

        assert!(matches!(error, ProcessError::Spawn { .. }));
        assert!(error
            .to_string()
            .starts_with("failed to start tsb-definitely-not-installed: "));
    }

    #[cfg(unix)]
    #[test]
    fn exit_status_decides_success()
    {
        let mut toolchain = ExternalToolchain {
            compiler: "true".to_string(),
            runtime: "false".to_string(),
        };

        let job = CompileJob {
            input: Path::new("app.ts"),
            out_dir: None,
        };

        assert!(toolchain.compile(&job).is_ok());

        let error = toolchain.execute(Path::new("app.js")).unwrap_err();

        assert!(matches!(error, ProcessError::Exit { .. }));
        assert_eq!(error.to_string(), "false exited with exit status: 1");
    }
}
