//! Host capabilities the agent runs against.
//!
//! The agent never touches the disk or an editor directly; it goes through
//! the traits here so the executor can be driven by real implementations in
//! the CLI and by in-memory ones in tests.

pub mod diagnostics;
pub mod editor;
pub mod fs;

pub use diagnostics::{Diagnostic, EditorDiagnostics, InMemoryDiagnostics, Severity};
pub use editor::{Editor, NoopEditor};
pub use fs::{DirEntry, FileSystem, LocalFileSystem};
