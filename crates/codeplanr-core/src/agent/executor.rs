//! Performing a single step against the workspace.

use std::{
    path::{Component, Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use log::{debug, warn};

use crate::{
    completion::CompletionProvider,
    error::{IoResultExt, StepFailure},
    host::{EditorDiagnostics, Editor, FileSystem, Severity},
    models::{Action, Step},
};

const CODE_SYSTEM_PROMPT: &str =
    "You are a code generator. Return only clean, executable code.";

/// Executes one step and describes what happened.
#[async_trait]
pub trait ExecuteStep: Send + Sync {
    /// Performs `step` relative to `workspace_root`, returning a
    /// human-readable result.
    async fn execute(&self, step: &Step, workspace_root: &Path) -> Result<String, StepFailure>;
}

/// Step executor backed by the host capabilities and a completion provider.
#[derive(Clone)]
pub struct StepExecutor {
    provider: Arc<dyn CompletionProvider>,
    fs: Arc<dyn FileSystem>,
    diagnostics: Arc<dyn EditorDiagnostics>,
    editor: Arc<dyn Editor>,
}

impl StepExecutor {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        fs: Arc<dyn FileSystem>,
        diagnostics: Arc<dyn EditorDiagnostics>,
        editor: Arc<dyn Editor>,
    ) -> Self {
        Self {
            provider,
            fs,
            diagnostics,
            editor,
        }
    }

    async fn create_file(&self, file: &str, path: &Path) -> Result<String, StepFailure> {
        if self.fs.exists(path).await {
            return Ok(format!("File {file} already exists"));
        }
        self.ensure_parent(path).await?;
        self.fs.write(path, "").await.step_context(path)?;
        Ok(format!("Created file: {file}"))
    }

    async fn write_code(
        &self,
        file: &str,
        path: &Path,
        description: &str,
    ) -> Result<String, StepFailure> {
        let prompt = format!(
            "Generate complete, working code for: {description}\n\
             File: {file}\n\
             Language: {}\n\n\
             Return ONLY the code, no explanations or markdown formatting.",
            language_for(file)
        );
        let response = self.provider.complete(CODE_SYSTEM_PROMPT, &prompt).await?;
        let code = strip_code_fences(&response);

        self.ensure_parent(path).await?;
        self.fs.write(path, &code).await.step_context(path)?;
        debug!("Wrote {} bytes to {}", code.len(), path.display());

        if let Err(e) = self.editor.open(path) {
            warn!("Could not open {} in the editor: {e}", path.display());
        }
        Ok(format!("Wrote code to {file}"))
    }

    fn check_errors(&self, file: &str, path: &Path) -> String {
        let diagnostics = self.diagnostics.for_file(path);
        if diagnostics.is_empty() {
            return format!("No errors found in {file}");
        }

        let count = |severity: Severity| {
            diagnostics
                .iter()
                .filter(|d| d.severity == severity)
                .count()
        };
        format!(
            "Found {} errors and {} warnings in {file}",
            count(Severity::Error),
            count(Severity::Warning)
        )
    }

    async fn modify_file(
        &self,
        file: &str,
        path: &Path,
        description: &str,
    ) -> Result<String, StepFailure> {
        if !self.fs.exists(path).await {
            return Err(StepFailure::FileNotFound {
                file: file.to_string(),
            });
        }

        let current = self.fs.read(path).await.step_context(path)?;
        let prompt = format!(
            "Modify this code according to: {description}\n\n\
             Current code:\n{current}\n\n\
             Return ONLY the complete modified code, no explanations or markdown."
        );
        let response = self.provider.complete(CODE_SYSTEM_PROMPT, &prompt).await?;
        let code = strip_code_fences(&response);

        self.fs.write(path, &code).await.step_context(path)?;
        Ok(format!("Modified {file}"))
    }

    async fn ensure_parent(&self, path: &Path) -> Result<(), StepFailure> {
        match path.parent() {
            Some(parent) if !self.fs.exists(parent).await => {
                self.fs.mkdir_recursive(parent).await.step_context(parent)
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ExecuteStep for StepExecutor {
    async fn execute(&self, step: &Step, workspace_root: &Path) -> Result<String, StepFailure> {
        let action = step.effective_action();
        let file = step
            .file
            .as_deref()
            .ok_or(StepFailure::MissingTarget { action })?;
        let path = resolve(workspace_root, file)?;
        debug!("Step {}: {action} on {}", step.id, path.display());

        match action {
            Action::CreateFile => self.create_file(file, &path).await,
            Action::WriteCode => self.write_code(file, &path, &step.description).await,
            Action::CheckErrors => Ok(self.check_errors(file, &path)),
            Action::ModifyFile => self.modify_file(file, &path, &step.description).await,
        }
    }
}

/// Joins `file` onto the workspace root, rejecting absolute paths and `..`
/// components that climb above the root.
fn resolve(workspace_root: &Path, file: &str) -> Result<PathBuf, StepFailure> {
    let outside = || StepFailure::OutsideWorkspace {
        file: file.to_string(),
    };

    let mut depth = 0usize;
    for component in Path::new(file).components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => depth = depth.checked_sub(1).ok_or_else(outside)?,
            Component::RootDir | Component::Prefix(_) => return Err(outside()),
        }
    }

    Ok(workspace_root.join(file))
}

/// Human-readable language name for the file's extension.
pub fn language_for(file: &str) -> &'static str {
    let extension = Path::new(file)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "cpp" | "cc" | "cxx" => "C++",
        "c" => "C",
        "h" | "hpp" => "C/C++ header",
        "js" => "JavaScript",
        "ts" => "TypeScript",
        "py" => "Python",
        "java" => "Java",
        "cs" => "C#",
        "go" => "Go",
        "rs" => "Rust",
        _ => "code",
    }
}

/// Removes a leading ```lang line and a trailing ``` line from model output.
///
/// The closing line is only dropped together with an opening one, so text
/// without a leading fence is just trimmed and a second pass is a no-op.
/// Backticks inside the code are left alone.
///
/// ```rust
/// use codeplanr_core::agent::strip_code_fences;
///
/// assert_eq!(strip_code_fences("```python\nprint(1)\n```"), "print(1)");
/// assert_eq!(strip_code_fences("print(1)"), "print(1)");
/// ```
pub fn strip_code_fences(text: &str) -> String {
    let mut lines: Vec<&str> = text.trim().lines().collect();

    if lines.first().is_some_and(|l| l.trim_start().starts_with("```")) {
        lines.remove(0);
        if lines.last().is_some_and(|l| l.trim() == "```") {
            lines.pop();
        }
    }

    lines.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fences_with_language_tag() {
        let raw = "```cpp\n#include <iostream>\nint main() { return 0; }\n```\n";
        assert_eq!(
            strip_code_fences(raw),
            "#include <iostream>\nint main() { return 0; }"
        );
    }

    #[test]
    fn test_strip_fences_is_idempotent() {
        let once = strip_code_fences("```\nfn main() {}\n```");
        assert_eq!(once, "fn main() {}");
        assert_eq!(strip_code_fences(&once), once);

        // A body that itself ends with a fence keeps it on the second pass
        let readme = "```markdown\n# Setup\n```bash\nnpm install\n```\n```";
        let once = strip_code_fences(readme);
        assert_eq!(once, "# Setup\n```bash\nnpm install\n```");
        assert_eq!(strip_code_fences(&once), once);
    }

    #[test]
    fn test_unopened_trailing_fence_is_kept() {
        assert_eq!(strip_code_fences("print(1)\n```"), "print(1)\n```");
    }

    #[test]
    fn test_resolve_stays_inside_workspace() {
        let root = Path::new("/work");
        assert_eq!(resolve(root, "src/main.rs").unwrap(), root.join("src/main.rs"));
        assert_eq!(resolve(root, "./a/../b.txt").unwrap(), root.join("./a/../b.txt"));

        for file in ["/etc/passwd", "../outside.txt", "src/../../outside.txt", ".."] {
            let err = resolve(root, file).unwrap_err();
            assert!(
                matches!(err, StepFailure::OutsideWorkspace { file: ref f } if f == file),
                "{file:?}"
            );
        }
    }

    #[test]
    fn test_inner_backticks_are_kept() {
        let raw = "```js\nconst fence = \"```\";\nconsole.log(fence);\n```";
        assert_eq!(
            strip_code_fences(raw),
            "const fence = \"```\";\nconsole.log(fence);"
        );
    }

    #[test]
    fn test_language_for_extensions() {
        assert_eq!(language_for("addition.cpp"), "C++");
        assert_eq!(language_for("src/main.RS"), "Rust");
        assert_eq!(language_for("script.py"), "Python");
        assert_eq!(language_for("Makefile"), "code");
    }
}
