use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::GenerateError;

pub const DEFAULT_DOCS_DIR: &str = "docs";
pub const DEFAULT_PROTO_FILE: &str = "specification/a2a.proto";

/// Where proto files are looked up.
///
/// Proto paths are relative to the parent of `docs_dir`, the same way an
/// MkDocs site refers to files next to its `docs/` folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsConfig {
    pub docs_dir: PathBuf,
    pub default_proto_file: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from(DEFAULT_DOCS_DIR),
            default_proto_file: DEFAULT_PROTO_FILE.to_string(),
        }
    }
}

// The subset of mkdocs.yml we care about.
#[derive(Debug, Deserialize)]
struct MkDocsFile {
    docs_dir: Option<PathBuf>,
}

impl DocsConfig {
    pub fn new(docs_dir: impl Into<PathBuf>) -> Self {
        Self {
            docs_dir: docs_dir.into(),
            ..Default::default()
        }
    }

    /// Reads `docs_dir` from an MkDocs config file. Like MkDocs, a relative
    /// `docs_dir` is taken relative to the directory holding the config file.
    pub fn from_mkdocs_file<P: AsRef<Path>>(path: P) -> Result<Self, GenerateError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| GenerateError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed: MkDocsFile =
            serde_yaml::from_str(&content).map_err(|source| GenerateError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let docs_dir = base.join(
            parsed
                .docs_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DOCS_DIR)),
        );
        tracing::debug!(config = %path.display(), docs_dir = %docs_dir.display(), "loaded mkdocs config");
        Ok(Self::new(docs_dir))
    }

    /// Full path of a proto file given relative to the docs site root.
    pub fn resolve(&self, proto_file: &str) -> PathBuf {
        self.docs_dir
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(proto_file)
    }
}
