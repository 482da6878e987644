//! Helpers shared by the unit tests.
use std::{
    env, fs,
    path::{Path, PathBuf},
    process,
    sync::atomic::{AtomicUsize, Ordering},
};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A temporary directory that is removed again when dropped.
pub struct ScratchDir
{
    path: PathBuf,
}

impl ScratchDir
{
    pub fn new(name: &str) -> Self
    {
        let path = env::temp_dir().join(format!(
            "tsb-{name}-{}-{}",
            process::id(),
            COUNTER.fetch_add(1, Ordering::Relaxed)
        ));

        _ = fs::remove_dir_all(&path);

        fs::create_dir_all(&path).unwrap();

        Self { path }
    }

    pub fn path(&self) -> &Path
    {
        &self.path
    }

    /// Writes `contents` to `relative`, creating parent directories.
    pub fn write(
        &self,
        relative: &str,
        contents: &str,
    ) -> PathBuf
    {
        let path = self.path.join(relative);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }

        fs::write(&path, contents).unwrap();

        path
    }
}

impl Drop for ScratchDir
{
    fn drop(&mut self)
    {
        _ = fs::remove_dir_all(&self.path);
    }
}
