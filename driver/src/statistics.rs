use std::{fs, time::Duration};

use crate::{error::BuildError, paths::OutputPlan};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildStatistics
{
    pub duration: Duration,
    pub output_size: u64,
    pub source_lines: usize,
}

impl BuildStatistics
{
    pub fn collect(
        duration: Duration,
        plan: &OutputPlan,
    ) -> Result<Self, BuildError>
    {
        let output_size = fs::metadata(&plan.output)
            .map_err(|source| BuildError::Io {
                path: plan.output.clone(),
                source,
            })?
            .len();

        let source = fs::read(&plan.input).map_err(|source| BuildError::Io {
            path: plan.input.clone(),
            source,
        })?;

        Ok(Self {
            duration,
            output_size,
            source_lines: count_lines(&source),
        })
    }

    pub fn seconds(&self) -> String
    {
        format!("{:.2}s", self.duration.as_secs_f64())
    }

    pub fn kilobytes(&self) -> String
    {
        format!("{:.2} KB", self.output_size as f64 / 1024.0)
    }
}

/// Number of pieces the text splits into at `\n`, so a trailing newline counts
/// as one more (empty) line.
pub fn count_lines(text: &[u8]) -> usize
{
    text.iter().filter(|&&byte| byte == b'\n').count() + 1
}
