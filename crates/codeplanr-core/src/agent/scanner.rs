//! Finding existing workspace files that relate to a request.
//!
//! The scanner walks the workspace root through [`FileSystem`], skips build
//! output and dependency directories, and ranks the remaining source files by
//! how strongly they match the words of the request. The planner lists the
//! best matches in its prompt so plans can refer to files that already exist.

use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use log::{debug, warn};

use crate::host::FileSystem;

/// Most files handed to the planner.
pub const MAX_RELEVANT_FILES: usize = 20;

const IGNORED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "coverage",
    ".vscode",
    "target",
];
const IGNORED_SUFFIXES: &[&str] = &[".log", ".tmp"];
const IGNORED_NAMES: &[&str] = &[".DS_Store"];

/// Programming-language sources; these score higher than assets.
const SOURCE_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "js", "jsx", "vue", "svelte", "py", "rs", "go", "java", "c", "cpp", "h", "hpp",
    "cs",
];
const ASSET_EXTENSIONS: &[&str] = &["json", "html", "css", "scss"];

const COMMON_WORDS: &[&str] = &[
    "the", "and", "but", "for", "with", "from", "about", "into", "through", "during", "before",
    "after", "above", "below", "between", "among", "add", "create", "make", "build", "implement",
    "feature", "function", "component", "page",
];

/// A request topic and the path and content hints that mark a file as
/// belonging to it.
struct Topic {
    triggers: &'static [&'static str],
    path_hints: &'static [&'static str],
    content_hints: &'static [&'static str],
}

const TOPICS: &[Topic] = &[
    Topic {
        triggers: &["login", "auth"],
        path_hints: &["auth", "login", "user"],
        content_hints: &["authentication", "login"],
    },
    Topic {
        triggers: &["api", "endpoint"],
        path_hints: &["api", "route", "controller"],
        content_hints: &["router", "endpoint"],
    },
    Topic {
        triggers: &["database", "db"],
        path_hints: &["model", "schema", "migration"],
        content_hints: &["database", "model"],
    },
    Topic {
        triggers: &["ui", "component"],
        path_hints: &["component", "ui", "view"],
        content_hints: &["component", "render"],
    },
];

/// A workspace file with its path relative to the root, `/`-separated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceFile {
    pub path: String,
    pub content: String,
}

impl WorkspaceFile {
    fn is_source(&self) -> bool {
        extension(&self.path).is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext.as_str()))
    }
}

/// Walks a workspace root and ranks its files against a request.
#[derive(Clone)]
pub struct WorkspaceScanner {
    file_system: Arc<dyn FileSystem>,
    root: PathBuf,
}

impl WorkspaceScanner {
    pub fn new(file_system: Arc<dyn FileSystem>, root: impl Into<PathBuf>) -> Self {
        Self {
            file_system,
            root: root.into(),
        }
    }

    /// Reads every candidate file under the root.
    ///
    /// Files that cannot be read as UTF-8 text are skipped.
    ///
    /// # Errors
    ///
    /// Returns the I/O error of the first directory that cannot be listed.
    pub async fn scan(&self) -> io::Result<Vec<WorkspaceFile>> {
        let mut files = Vec::new();
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            for entry in self.file_system.list_dir(&dir).await? {
                let Some(name) = entry.path.file_name().and_then(|n| n.to_str()) else {
                    continue;
                };
                if entry.is_dir {
                    if !IGNORED_DIRS.contains(&name) {
                        pending.push(entry.path);
                    }
                    continue;
                }
                if !is_candidate(name) {
                    continue;
                }
                match self.file_system.read(&entry.path).await {
                    Ok(content) => files.push(WorkspaceFile {
                        path: relative(&self.root, &entry.path),
                        content,
                    }),
                    Err(e) => debug!("Skipping {}: {e}", entry.path.display()),
                }
            }
        }

        debug!("Scanned {} files under {}", files.len(), self.root.display());
        Ok(files)
    }

    /// Paths of the files most relevant to `request`, best first.
    ///
    /// At most [`MAX_RELEVANT_FILES`] are returned. A failed scan is logged
    /// and yields no files, so planning can go ahead without context.
    pub async fn relevant_files(&self, request: &str) -> Vec<String> {
        let files = match self.scan().await {
            Ok(files) => files,
            Err(e) => {
                warn!("Failed to scan {}: {e}", self.root.display());
                return Vec::new();
            }
        };
        rank(files, request)
    }
}

/// Keeps the files relevant to `request` and orders them by score, then path.
pub fn rank(files: Vec<WorkspaceFile>, request: &str) -> Vec<String> {
    let keywords = keywords(request);
    let mut scored: Vec<(usize, String)> = files
        .into_iter()
        .filter(|file| is_relevant(file, request, &keywords))
        .map(|file| (score(&file, request, &keywords), file.path))
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    scored.truncate(MAX_RELEVANT_FILES);
    scored.into_iter().map(|(_, path)| path).collect()
}

/// Lowercased words of `request` that are long enough and not filler.
pub fn keywords(request: &str) -> Vec<String> {
    request
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.chars().count() > 2)
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric() || *c == '_')
                .collect::<String>()
        })
        .filter(|word| !word.is_empty() && !COMMON_WORDS.contains(&word.as_str()))
        .collect()
}

fn is_relevant(file: &WorkspaceFile, request: &str, keywords: &[String]) -> bool {
    let path = file.path.to_lowercase();
    let content = file.content.to_lowercase();
    keywords
        .iter()
        .any(|k| path.contains(k.as_str()) || content.contains(k.as_str()))
        || matches_topic(file, request)
}

/// Three points per keyword in the path, one per occurrence in the content,
/// two for source files and five for a matching topic.
pub fn score(file: &WorkspaceFile, request: &str, keywords: &[String]) -> usize {
    let path = file.path.to_lowercase();
    let content = file.content.to_lowercase();

    let mut score = 0;
    for keyword in keywords {
        if path.contains(keyword.as_str()) {
            score += 3;
        }
        score += content.matches(keyword.as_str()).count();
    }
    if file.is_source() {
        score += 2;
    }
    if matches_topic(file, request) {
        score += 5;
    }
    score
}

/// Only the first topic the request mentions is considered.
fn matches_topic(file: &WorkspaceFile, request: &str) -> bool {
    let request = request.to_lowercase();
    let Some(topic) = TOPICS
        .iter()
        .find(|topic| topic.triggers.iter().any(|t| request.contains(t)))
    else {
        return false;
    };

    let path = file.path.to_lowercase();
    let content = file.content.to_lowercase();
    topic.path_hints.iter().any(|hint| path.contains(hint))
        || topic.content_hints.iter().any(|hint| content.contains(hint))
}

fn is_candidate(name: &str) -> bool {
    if IGNORED_NAMES.contains(&name) || IGNORED_SUFFIXES.iter().any(|s| name.ends_with(s)) {
        return false;
    }
    extension(name).is_some_and(|ext| {
        SOURCE_EXTENSIONS.contains(&ext.as_str()) || ASSET_EXTENSIONS.contains(&ext.as_str())
    })
}

fn extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
}

fn relative(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::host::LocalFileSystem;

    fn file(path: &str, content: &str) -> WorkspaceFile {
        WorkspaceFile {
            path: path.to_string(),
            content: content.to_string(),
        }
    }

    fn write(root: &Path, path: &str, content: &str) {
        let path = root.join(path);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_keywords_drop_short_and_common_words() {
        assert_eq!(
            keywords("Add a login form to the Settings page!"),
            vec!["login", "form", "settings"]
        );
        assert!(keywords("create it ... ok").is_empty());
    }

    #[test]
    fn test_score_weights_path_content_source_and_topic() {
        let keywords = keywords("fix the login flow");
        let source = file("src/auth/login.ts", "export function login() { login(); }");
        // path 3, content 2, source 2, topic 5
        assert_eq!(score(&source, "fix the login flow", &keywords), 12);

        let asset = file("styles/site.css", "body {}");
        assert_eq!(score(&asset, "fix the login flow", &keywords), 0);
    }

    #[test]
    fn test_rank_orders_by_score_then_path_and_caps() {
        let mut files: Vec<WorkspaceFile> = (0..30)
            .map(|i| file(&format!("lib/parser_{i:02}.rs"), "parser"))
            .collect();
        files.push(file("src/parser.rs", "parser parser parser"));
        files.push(file("README.json", "{}"));

        let ranked = rank(files, "speed up the parser");

        assert_eq!(ranked.len(), MAX_RELEVANT_FILES);
        assert_eq!(ranked[0], "src/parser.rs");
        assert_eq!(ranked[1], "lib/parser_00.rs");
        assert!(!ranked.contains(&"README.json".to_string()));
    }

    #[tokio::test]
    async fn test_scan_skips_ignored_directories_and_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        write(root, "src/auth/login.ts", "export const login = () => {};");
        write(root, "src/main.py", "print('hello')");
        write(root, "node_modules/pkg/login.js", "module.exports = {};");
        write(root, ".git/hooks/login.js", "");
        write(root, "dist/login.js", "");
        write(root, "debug.log", "login failed");
        write(root, "notes.md", "login notes");

        let scanner = WorkspaceScanner::new(Arc::new(LocalFileSystem), root);
        let mut paths: Vec<String> = scanner
            .scan()
            .await
            .expect("scan")
            .into_iter()
            .map(|f| f.path)
            .collect();
        paths.sort();

        assert_eq!(paths, vec!["src/auth/login.ts", "src/main.py"]);
    }

    #[tokio::test]
    async fn test_relevant_files_only_returns_matches() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        write(root, "src/auth/login.ts", "export const login = () => {};");
        write(root, "src/cart.ts", "export const total = 0;");

        let scanner = WorkspaceScanner::new(Arc::new(LocalFileSystem), root);

        assert_eq!(
            scanner.relevant_files("fix the login redirect").await,
            vec!["src/auth/login.ts"]
        );
    }

    #[tokio::test]
    async fn test_missing_root_yields_no_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let missing = temp_dir.path().join("gone");
        let scanner = WorkspaceScanner::new(Arc::new(LocalFileSystem), missing);

        assert!(scanner.scan().await.is_err());
        assert!(scanner.relevant_files("fix the login redirect").await.is_empty());
    }
}
