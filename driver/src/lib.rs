use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use log::{debug, error, info};
use owo_colors::OwoColorize;

pub mod error;
pub mod flags;
pub mod paths;
pub mod statistics;
pub mod terminal;
pub mod toolchain;

#[cfg(test)]
mod testing;

pub use error::BuildError;
pub use flags::{parse_arguments, ArgumentError, Command, Flags};
pub use paths::OutputPlan;
pub use statistics::BuildStatistics;
pub use terminal::{Console, Terminal};
pub use toolchain::{CompileJob, ExternalToolchain, ProcessError, Toolchain};

pub const SOURCE_EXTENSION: &str = "ts";
pub const OUTPUT_EXTENSION: &str = "js";

/// Project configuration the compiler picks up on its own.
pub const PROJECT_CONFIG: &str = "tsconfig.json";

/// A finished compilation, kept only until the run step is decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledArtifact
{
    pub input: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary
{
    pub compiled: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Builds input files one after the other.
pub struct Driver<T, C>
{
    flags: Flags,
    toolchain: T,
    terminal: C,
    cwd: PathBuf,
}

impl<T, C> Driver<T, C>
where
    T: Toolchain,
    C: Terminal,
{
    pub fn new(
        flags: Flags,
        toolchain: T,
        terminal: C,
        cwd: impl Into<PathBuf>,
    ) -> Self
    {
        Self {
            flags,
            toolchain,
            terminal,
            cwd: cwd.into(),
        }
    }

    #[cfg(test)]
    fn toolchain(&self) -> &T
    {
        &self.toolchain
    }

    #[cfg(test)]
    fn terminal(&self) -> &C
    {
        &self.terminal
    }

    /// Whether the working directory carries a `tsconfig.json`.
    pub fn has_project_config(&self) -> bool
    {
        self.cwd.join(PROJECT_CONFIG).is_file()
    }

    /// Compiles every input in order, offering to run the result when there
    /// is exactly one.
    ///
    /// Failures are logged per file and never stop the loop.
    pub fn build_all(
        &mut self,
        inputs: &[String],
    ) -> BuildSummary
    {
        self.announce_project_config();

        let offer_run = inputs.len() == 1;
        let mut summary = BuildSummary::default();

        for input in inputs {
            info!("{} {input}", "Preparing to compile:".cyan());

            match self.compile_file(input) {
                Ok(Some(artifact)) => {
                    summary.compiled += 1;

                    if offer_run {
                        self.offer_run(&artifact);
                    }
                }
                Ok(None) => {
                    summary.skipped += 1;
                    info!("Build failed or skipped.");
                }
                Err(error) => {
                    summary.failed += 1;
                    error!("{error}");
                    info!("Build failed or skipped.");
                }
            }
        }

        debug!("{summary:?}");

        summary
    }

    /// Builds a single file.
    ///
    /// `Ok(None)` means the user declined to replace an existing output.
    pub fn compile_file(
        &mut self,
        input: &str,
    ) -> Result<Option<CompiledArtifact>, BuildError>
    {
        let plan = OutputPlan::resolve(input, &self.flags, &self.cwd);

        debug!("{plan:?}");

        if !plan.input.exists() {
            return Err(BuildError::InputNotFound { path: plan.input });
        }

        let created = plan
            .ensure_out_dir()
            .map_err(|source| BuildError::CreateOutDir {
                path: plan.out_dir.clone(),
                source,
            })?;

        if created {
            info!(
                "{} {}",
                "Created output directory:".cyan(),
                plan.out_dir.display()
            );
        }

        if plan.output.exists() && !self.flags.force && !self.confirm_overwrite(&plan.output)? {
            info!("Aborted by user.");

            return Ok(None);
        }

        info!(
            "{}",
            format!("Compiling with {}...", self.toolchain.compiler_name()).cyan()
        );

        let job = CompileJob {
            input: &plan.input,
            out_dir: plan.compiler_out_dir(),
        };

        let started = Instant::now();

        self.toolchain
            .compile(&job)
            .map_err(|source| BuildError::CompilationFailed {
                input: input.to_string(),
                source,
            })?;

        let duration = started.elapsed();

        if !plan.output.exists() {
            return Err(BuildError::ExpectedOutputMissing { path: plan.output });
        }

        let statistics = BuildStatistics::collect(duration, &plan)?;

        self.report(&plan, &statistics);

        Ok(Some(CompiledArtifact {
            input: plan.input,
            output: plan.output,
        }))
    }

    /// Clears the terminal and hands the artifact to the runtime.
    pub fn run_artifact(
        &mut self,
        artifact: &CompiledArtifact,
    ) -> Result<(), BuildError>
    {
        self.terminal.clear();

        self.toolchain
            .execute(&artifact.output)
            .map_err(|source| BuildError::ExecutionFailed { source })
    }

    fn offer_run(
        &mut self,
        artifact: &CompiledArtifact,
    )
    {
        if self.flags.silent {
            return;
        }

        if !self.flags.autorun {
            let question = "Run compiled script now? (y/n): ".blue().to_string();

            if !self.terminal.confirm(&question) {
                return;
            }
        }

        if let Err(error) = self.run_artifact(artifact) {
            error!("{error}");
        }
    }

    fn confirm_overwrite(
        &mut self,
        output: &Path,
    ) -> Result<bool, BuildError>
    {
        if self.flags.silent {
            return Err(BuildError::OutputExists {
                path: output.to_path_buf(),
            });
        }

        let question = format!(
            "{} {} already exists. Replace? (y/n): ",
            "warning:".yellow(),
            output.display()
        );

        Ok(self.terminal.confirm(&question))
    }

    fn announce_project_config(&self)
    {
        if self.has_project_config() {
            info!("{}", format!("{PROJECT_CONFIG} found, using it").cyan());
        }
    }

    fn report(
        &self,
        plan: &OutputPlan,
        statistics: &BuildStatistics,
    )
    {
        info!(
            "{} ({})",
            "Compilation successful".green(),
            statistics.seconds()
        );
        info!(
            "{} {} ({})",
            "Output file:".magenta(),
            paths::display_relative(&plan.output, &self.cwd),
            statistics.kilobytes()
        );
        info!("{} {}", "Source lines:".cyan(), statistics.source_lines);
    }
}
