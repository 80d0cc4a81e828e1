//! Step action enumeration and keyword inference.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of the operations a step can perform.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Create an empty file unless it already exists
    CreateFile,

    /// Generate code and overwrite the file with it
    WriteCode,

    /// Count the editor diagnostics reported for the file
    CheckErrors,

    /// Rewrite an existing file according to the description
    ModifyFile,
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "create_file" => Ok(Action::CreateFile),
            "write_code" => Ok(Action::WriteCode),
            "check_errors" => Ok(Action::CheckErrors),
            "modify_file" => Ok(Action::ModifyFile),
            _ => Err(format!("Invalid action: {s}")),
        }
    }
}

impl Action {
    /// Wire representation used in plan payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::CreateFile => "create_file",
            Action::WriteCode => "write_code",
            Action::CheckErrors => "check_errors",
            Action::ModifyFile => "modify_file",
        }
    }

    /// Guess the action from a free-text step description.
    ///
    /// Rules are checked in order and the first match wins, so a description
    /// mentioning both "create ... file" and "check" is a `CreateFile`.
    /// Anything unmatched defaults to `WriteCode`.
    ///
    /// ```rust
    /// use codeplanr_core::models::Action;
    ///
    /// assert_eq!(Action::infer("Create the main file"), Action::CreateFile);
    /// assert_eq!(Action::infer("Check for compilation errors"), Action::CheckErrors);
    /// assert_eq!(Action::infer("Do something"), Action::WriteCode);
    /// ```
    pub fn infer(description: &str) -> Self {
        let lower = description.to_lowercase();
        let has = |word: &str| lower.contains(word);

        if has("create") && has("file") {
            Action::CreateFile
        } else if has("write") || has("code") {
            Action::WriteCode
        } else if has("check") || has("error") {
            Action::CheckErrors
        } else if has("modify") || has("update") {
            Action::ModifyFile
        } else {
            Action::WriteCode
        }
    }
}
