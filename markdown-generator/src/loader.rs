use parser::{Element, parse_proto_file};

use crate::GenerateError;
use crate::config::DocsConfig;

/// Parses a proto file and attaches comments to every element.
///
/// `proto_file` is relative to the docs site root (see [`DocsConfig::resolve`]).
/// Each call reads the file again; nothing is cached between calls.
pub fn load_proto(config: &DocsConfig, proto_file: &str) -> Result<Vec<Element>, GenerateError> {
    let full_path = config.resolve(proto_file);
    if !full_path.exists() {
        return Err(GenerateError::ProtoNotFound(proto_file.to_string()));
    }
    tracing::debug!(path = %full_path.display(), "loading proto");
    let mut file = parse_proto_file(&full_path)?;
    file.attach_comments();
    Ok(file.elements)
}
