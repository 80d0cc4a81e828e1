//! Opening documents for the user.

use std::{io, path::Path};

use log::debug;

/// Shows a file to the user after the agent wrote it.
pub trait Editor: Send + Sync {
    fn open(&self, path: &Path) -> io::Result<()>;
}

/// Editor that only records the request in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEditor;

impl Editor for NoopEditor {
    fn open(&self, path: &Path) -> io::Result<()> {
        debug!("Would open {} in the editor", path.display());
        Ok(())
    }
}
