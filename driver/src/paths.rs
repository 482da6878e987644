use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};

use crate::{flags::Flags, OUTPUT_EXTENSION};

/// Where a single input file is read from and where its output is expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPlan
{
    pub input: PathBuf,
    pub out_dir: PathBuf,
    pub output: PathBuf,

    /// Set when `--outDir` was given; the compiler then has to be told about it.
    pub out_dir_override: bool,
}

impl OutputPlan
{
    pub fn resolve(
        input: &str,
        flags: &Flags,
        cwd: &Path,
    ) -> Self
    {
        let input = absolute(cwd, Path::new(input));

        let (out_dir, out_dir_override) = match &flags.out_dir {
            Some(dir) => (absolute(cwd, dir), true),
            None => (
                input
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| cwd.to_path_buf()),
                false,
            ),
        };

        let output = match &flags.output_name {
            Some(name) => normalize(&out_dir.join(without_root(Path::new(name)))),
            None => out_dir.join(default_output_name(&input)),
        };

        Self {
            input,
            out_dir,
            output,
            out_dir_override,
        }
    }

    /// The `--outDir` value to hand to the compiler, if any.
    pub fn compiler_out_dir(&self) -> Option<&Path>
    {
        self.out_dir_override.then_some(self.out_dir.as_path())
    }

    /// Creates an overridden output directory when it is missing.
    ///
    /// Returns whether a directory was created.
    pub fn ensure_out_dir(&self) -> io::Result<bool>
    {
        if !self.out_dir_override || self.out_dir.is_dir() {
            return Ok(false);
        }

        fs::create_dir_all(&self.out_dir)?;

        Ok(true)
    }
}

fn absolute(
    cwd: &Path,
    path: &Path,
) -> PathBuf
{
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&cwd.join(path))
    }
}

/// Folds `.` and `..` away without looking at the filesystem.
///
/// `..` never climbs above the root.
fn normalize(path: &Path) -> PathBuf
{
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                Some(Component::ParentDir | Component::CurDir) | None => normalized.push(".."),
            },
            other => normalized.push(other),
        }
    }

    normalized
}

/// An output name is always placed inside the output directory.
fn without_root(name: &Path) -> PathBuf
{
    name.components()
        .filter(|component| !matches!(component, Component::RootDir | Component::Prefix(_)))
        .collect()
}

fn default_output_name(input: &Path) -> String
{
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();

    format!("{stem}.{OUTPUT_EXTENSION}")
}

/// Renders `path` relative to `base` when it lives below it.
pub fn display_relative(
    path: &Path,
    base: &Path,
) -> String
{
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}
