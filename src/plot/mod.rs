//! Plot rendering for the visualization mode.

#[cfg(feature = "plot")]
pub mod png;

#[cfg(feature = "plot")]
pub use png::PngPlotter;

use crate::error::Result;
use crate::signal::Recording;
use std::fs;
use std::path::{Path, PathBuf};

/// Trait for rendering one recording to an image file.
pub trait Visualizer: Send + Sync {
    /// Called once before any rendering starts.
    fn prepare(&self) -> Result<()> {
        Ok(())
    }

    /// Render `recording` for the file `name`, returning the written path.
    fn render(&self, name: &str, recording: &Recording) -> Result<PathBuf>;
}

/// Empties `dir`, creating it if needed.
pub fn reset_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)?;
        tracing::info!(dir = %dir.display(), "existing output directory cleared");
    }
    fs::create_dir_all(dir)?;
    tracing::debug!(dir = %dir.display(), "output directory created");
    Ok(())
}

/// Output file name for a recording: the input stem with a `.png` extension.
pub fn image_name(name: &str) -> String {
    let stem = Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string());
    format!("{}.png", stem)
}
