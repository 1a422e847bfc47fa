// Proto types shown under a fixed name and never linked.
const TYPE_MAP: [(&str, &str); 11] = [
    ("string", "string"),
    ("int32", "integer"),
    ("int64", "integer"),
    ("bool", "boolean"),
    ("bytes", "bytes"),
    ("double", "float"),
    ("float", "float"),
    ("google.protobuf.Struct", "object"),
    ("google.protobuf.Timestamp", "timestamp"),
    ("google.protobuf.Value", "any"),
    ("google.protobuf.Empty", "empty"),
];

fn mapped_name(proto_type: &str) -> Option<&'static str> {
    TYPE_MAP
        .iter()
        .find(|(from, _)| *from == proto_type)
        .map(|(_, to)| *to)
}

/// Formats a type name for the docs, linking message and enum types to their
/// heading anchor.
///
/// A map key is shown through the same name mapping, unlinked and without
/// backticks. The map form wins over `is_repeated`.
pub fn format_type_for_docs(proto_type: &str, is_repeated: bool, map_key: Option<&str>) -> String {
    let mapped = mapped_name(proto_type);
    let display_name =
        mapped.unwrap_or_else(|| proto_type.rsplit_once('.').map_or(proto_type, |(_, simple)| simple));
    let is_primitive = mapped.is_some() || proto_type.starts_with("google.protobuf");

    let mut label = format!("`{display_name}`");
    if !is_primitive {
        label = format!("[{label}](#{})", display_name.to_lowercase());
    }

    if let Some(key) = map_key {
        let key_label = mapped_name(key).unwrap_or(key);
        return format!("map of {key_label} to {label}");
    }

    if is_repeated {
        return format!("array of {label}");
    }

    label
}
