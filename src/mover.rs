//! The move primitive used by the organizer.
//!
//! Moving goes through the [`FileMover`] trait so the organizer can be driven
//! against something other than the real filesystem.

use log::debug;
use std::fs;
use std::io;
use std::path::Path;

/// Relocates a single file.
pub trait FileMover {
    /// Moves `from` to `to`. `to` must not exist yet.
    fn move_file(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// Moves files on the local filesystem.
///
/// Uses `fs::rename`, and falls back to copy-then-remove when source and
/// destination live on different devices.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsMover;

impl FileMover for FsMover {
    fn move_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                debug!(
                    "rename across devices, copying {} -> {}",
                    from.display(),
                    to.display()
                );
                copy_then_remove(from, to)
            }
            Err(e) => Err(e),
        }
    }
}

fn copy_then_remove(from: &Path, to: &Path) -> io::Result<()> {
    fs::copy(from, to)?;
    if let Err(e) = fs::remove_file(from) {
        // Leave exactly one copy behind.
        let _ = fs::remove_file(to);
        return Err(e);
    }
    Ok(())
}
