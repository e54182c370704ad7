//! Source tree scanning
//!
//! Walks a project directory, parses every `.py` file and splits the root
//! module of each import into local edges (the name matches a file in the
//! project) and external references.

use crate::error::{path_error, ReqwalkerError, Result};
use crate::models::{FileScan, ScanResult, Settings, SkippedFile};
use crate::parsers::ImportParser;
use glob::Pattern;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Python source file extension
pub const SOURCE_EXTENSION: &str = ".py";

/// How an import root is matched against project file names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalMatch {
    /// The root is a substring of some file's basename (`b` matches `b.py` and `lib.py`)
    #[default]
    Substring,
    /// The root equals some file's basename without the extension
    ExactStem,
}

/// Classification of an import root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportClass {
    Local,
    External,
}

/// Decide whether `root` refers to a file of the project.
///
/// `basenames` are the file names (with extension) of every source file found
/// by the walk, the importing file included.
pub fn classify_import(root: &str, basenames: &[String], mode: LocalMatch) -> ImportClass {
    let is_local = match mode {
        LocalMatch::Substring => basenames.iter().any(|name| name.contains(root)),
        LocalMatch::ExactStem => basenames
            .iter()
            .any(|name| name.strip_suffix(SOURCE_EXTENSION) == Some(root)),
    };

    if is_local {
        ImportClass::Local
    } else {
        ImportClass::External
    }
}

/// Identifier of `path` relative to `root`, with `/` separators
pub fn relative_id(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Scanner for Python project trees
pub struct Scanner {
    exclude_patterns: Vec<Pattern>,
    max_depth: Option<usize>,
    follow_links: bool,
    local_match: LocalMatch,
    parser: ImportParser,
}

impl Scanner {
    /// Create a scanner from settings, compiling the exclude patterns
    pub fn new(settings: &Settings) -> Result<Self> {
        let exclude_patterns = settings
            .exclude_patterns
            .iter()
            .map(|p| Pattern::new(p).map_err(ReqwalkerError::from))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            exclude_patterns,
            max_depth: settings.max_depth,
            follow_links: settings.follow_links,
            local_match: if settings.exact_local_match {
                LocalMatch::ExactStem
            } else {
                LocalMatch::Substring
            },
            parser: ImportParser::new(),
        })
    }

    /// Scanner with no exclusions, unlimited depth and substring matching
    pub fn with_defaults() -> Self {
        Self {
            exclude_patterns: Vec::new(),
            max_depth: None,
            follow_links: false,
            local_match: LocalMatch::Substring,
            parser: ImportParser::new(),
        }
    }

    /// Override the local matching mode
    pub fn with_local_match(mut self, local_match: LocalMatch) -> Self {
        self.local_match = local_match;
        self
    }

    /// Scan a project tree
    pub fn scan(&self, root: &Path) -> Result<ScanResult> {
        self.scan_with_progress(root, |_, _, _| {})
    }

    /// Scan a project tree, reporting `(current, total, message)` per file
    pub fn scan_with_progress<F>(&self, root: &Path, progress_fn: F) -> Result<ScanResult>
    where
        F: Fn(usize, usize, &str),
    {
        if !root.is_dir() {
            return Err(ReqwalkerError::invalid_path(root));
        }

        let mut result = ScanResult::new();
        let sources = self.discover_sources(root, &mut result.skipped_files);
        let basenames: Vec<String> = sources
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();

        result.files_discovered = sources.len();
        let total = sources.len();

        for (i, path) in sources.iter().enumerate() {
            let scan = self.scan_file(root, path, &basenames);
            progress_fn(i + 1, total, scan.file());
            result.add_file(scan);
        }

        Ok(result)
    }

    /// Find every source file under `root` in sorted walk order.
    ///
    /// Entries the walk cannot read are recorded in `skipped` and do not stop
    /// the walk.
    pub fn discover_sources(&self, root: &Path, skipped: &mut Vec<SkippedFile>) -> Vec<PathBuf> {
        let mut walker = WalkDir::new(root)
            .follow_links(self.follow_links)
            .sort_by_file_name();
        if let Some(max_depth) = self.max_depth {
            walker = walker.max_depth(max_depth);
        }

        let mut sources = Vec::new();
        for entry in walker
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !self.is_excluded(root, e))
        {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file()
                        && entry.file_name().to_string_lossy().ends_with(SOURCE_EXTENSION)
                    {
                        sources.push(entry.into_path());
                    }
                }
                Err(err) => {
                    let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
                    skipped.push(SkippedFile {
                        file: relative_id(root, &path),
                        reason: path_error(&err, &path).to_string(),
                    });
                }
            }
        }

        sources
    }

    /// Parse one file and classify its imports
    pub fn scan_file(&self, root: &Path, path: &Path, basenames: &[String]) -> FileScan {
        let file = relative_id(root, path);

        let imports = match self.parser.parse_file(path) {
            Ok(imports) => imports,
            Err(err) => {
                return FileScan::Skipped {
                    file,
                    reason: err.to_string(),
                }
            }
        };

        let mut local_edges = Vec::new();
        let mut external = Vec::new();
        for import in &imports {
            let root_name = import.root();
            match classify_import(root_name, basenames, self.local_match) {
                ImportClass::Local => local_edges.push(format!("{}{}", root_name, SOURCE_EXTENSION)),
                ImportClass::External => external.push(root_name.to_string()),
            }
        }

        FileScan::Parsed {
            file,
            local_edges,
            external,
        }
    }

    /// Check if a walk entry matches any exclude pattern, by name or by relative path
    fn is_excluded(&self, root: &Path, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        let relative = relative_id(root, entry.path());
        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.matches(&name) || pattern.matches(&relative))
    }
}
