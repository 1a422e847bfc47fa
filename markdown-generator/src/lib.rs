//! Markdown tables for messages, enums and services of a `.proto` file,
//! meant to be embedded in documentation pages.
//!
//! [`DocsEnv`] is the entry point. Its three renderers differ in how they
//! report failures:
//! - [`DocsEnv::proto_to_table`] turns only a missing proto file into an
//!   inline `**Error:**` string; parse failures come back as `Err`.
//! - [`DocsEnv::proto_enum_to_table`] and [`DocsEnv::proto_service_to_table`]
//!   turn every failure into an inline `**Error:**` string.
//!
//! An unknown type name is always reported inline.

pub mod config;
pub mod describe;
pub mod loader;
pub mod render;
pub mod rows;
pub mod table;
pub mod types;

use std::path::PathBuf;

use thiserror::Error;

pub use config::{DEFAULT_PROTO_FILE, DocsConfig};
pub use loader::load_proto;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Proto not found: {0}")]
    ProtoNotFound(String),
    #[error(transparent)]
    Parse(#[from] parser::ParseError),
    #[error("Failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

fn inline_error(e: &GenerateError) -> String {
    format!("**Error:** {e}")
}

#[derive(Debug, Clone, Default)]
pub struct DocsEnv {
    config: DocsConfig,
}

impl DocsEnv {
    pub fn new(config: DocsConfig) -> Self {
        Self { config }
    }

    fn proto_file<'a>(&'a self, proto_file: Option<&'a str>) -> &'a str {
        proto_file.unwrap_or(&self.config.default_proto_file)
    }

    /// Renders the field table of a message.
    pub fn proto_to_table(
        &self,
        message_name: &str,
        proto_file: Option<&str>,
    ) -> Result<String, GenerateError> {
        let elements = match load_proto(&self.config, self.proto_file(proto_file)) {
            Ok(elements) => elements,
            Err(e @ GenerateError::ProtoNotFound(_)) => {
                tracing::warn!(error = %e, "cannot render message");
                return Ok(inline_error(&e));
            }
            Err(e) => return Err(e),
        };
        Ok(render::message_table(&elements, message_name))
    }

    /// Renders the value table of an enum.
    pub fn proto_enum_to_table(&self, enum_name: &str, proto_file: Option<&str>) -> String {
        match load_proto(&self.config, self.proto_file(proto_file)) {
            Ok(elements) => render::enum_table(&elements, enum_name),
            Err(e) => {
                tracing::warn!(error = %e, "cannot render enum");
                inline_error(&e)
            }
        }
    }

    /// Renders the method table of a service.
    pub fn proto_service_to_table(&self, service_name: &str, proto_file: Option<&str>) -> String {
        match load_proto(&self.config, self.proto_file(proto_file)) {
            Ok(elements) => render::service_table(&elements, service_name),
            Err(e) => {
                tracing::warn!(error = %e, "cannot render service");
                inline_error(&e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn env_with(proto: &str) -> (tempfile::TempDir, DocsEnv) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("specification")).unwrap();
        fs::write(dir.path().join("specification/a2a.proto"), proto).unwrap();
        let env = DocsEnv::new(DocsConfig::new(dir.path().join("docs")));
        (dir, env)
    }

    #[test]
    fn missing_proto_is_reported_inline_by_all_renderers() {
        let env = DocsEnv::new(DocsConfig::new("/nonexistent/docs"));
        let expected = "**Error:** Proto not found: specification/a2a.proto";
        assert_eq!(env.proto_to_table("Task", None).unwrap(), expected);
        assert_eq!(env.proto_enum_to_table("TaskState", None), expected);
        assert_eq!(env.proto_service_to_table("A2AService", None), expected);
    }

    #[test]
    fn parse_failure_propagates_only_from_message_renderer() {
        let (_dir, env) = env_with("message Broken { int32 id = 1 }");

        let err = env.proto_to_table("Broken", None).unwrap_err();
        assert!(matches!(err, GenerateError::Parse(_)));

        let enum_out = env.proto_enum_to_table("Anything", None);
        assert!(enum_out.starts_with("**Error:** Parse error:"));
        let service_out = env.proto_service_to_table("Anything", None);
        assert!(service_out.starts_with("**Error:** Parse error:"));
    }

    #[test]
    fn explicit_proto_file_overrides_default() {
        let (dir, env) = env_with("message Unused { string a = 1; }");
        fs::write(
            dir.path().join("other.proto"),
            "// Other.\nmessage Other { string b = 1; }",
        )
        .unwrap();

        let out = env.proto_to_table("Other", Some("other.proto")).unwrap();
        assert!(out.starts_with("Other.\n\n| Field "));
        assert_eq!(
            env.proto_to_table("Other", None).unwrap(),
            "**Error:** Message `Other` not found."
        );
    }
}
