//! Markdown renderers for messages, enums and services.
//!
//! Each renderer works on an element tree whose comments are already
//! attached and returns the Markdown to embed in the page. A missing type is
//! reported in the returned text, not as an error.

use parser::{Element, ElementKind, find_enum, find_message, find_service};

use crate::describe::extract_comments;
use crate::rows::{FieldRef, process_field};
use crate::table::github_table;
use crate::types::format_type_for_docs;

pub const NONE: &str = "None";

pub fn not_found(kind: ElementKind, name: &str) -> String {
    format!("**Error:** {kind} `{name}` not found.")
}

/// Field table of a message, followed by a note for every oneof with more
/// than one member.
pub fn message_table(elements: &[Element], message_name: &str) -> String {
    let Some(message) = find_message(elements, message_name) else {
        tracing::warn!(name = message_name, "message not found");
        return not_found(ElementKind::Message, message_name);
    };

    let mut rows = Vec::new();
    // oneof name -> member display names, in first-seen order
    let mut oneof_groups: Vec<(&str, Vec<String>)> = Vec::new();

    for el in &message.elements {
        match el {
            Element::Field(f) => rows.push(process_field(FieldRef::Field(f), false)),
            Element::MapField(m) => rows.push(process_field(FieldRef::Map(m), false)),
            Element::OneOf(oneof) => {
                for member in &oneof.elements {
                    let Element::Field(f) = member else {
                        continue;
                    };
                    let row = process_field(FieldRef::Field(f), true);
                    let display = row.name.trim_matches('`').to_string();
                    match oneof_groups.iter_mut().find(|(name, _)| *name == oneof.name) {
                        Some((_, members)) => members.push(display),
                        None => oneof_groups.push((oneof.name.as_str(), vec![display])),
                    }
                    rows.push(row);
                }
            }
            _ => {}
        }
    }

    if rows.is_empty() {
        return NONE.to_string();
    }

    let mut output = Vec::new();

    let description = extract_comments(&message.comments);
    if !description.is_empty() {
        output.push(description);
        output.push(String::new());
    }

    let rows: Vec<Vec<String>> = rows.into_iter().map(|r| r.into_cells()).collect();
    output.push(github_table(
        &["Field", "Type", "Required", "Description"],
        &rows,
    ));

    if !oneof_groups.is_empty() {
        output.push(String::new());
        for (_, members) in oneof_groups.iter().filter(|(_, m)| m.len() > 1) {
            let list = members
                .iter()
                .map(|m| format!("`{m}`"))
                .collect::<Vec<_>>()
                .join(", ");
            output.push(format!(
                "**Note:** A `{message_name}` MUST contain exactly one of the following: {list}"
            ));
        }
    }

    output.join("\n")
}

/// Value table of an enum, preceded by the enum's description.
pub fn enum_table(elements: &[Element], enum_name: &str) -> String {
    let Some(en) = find_enum(elements, enum_name) else {
        tracing::warn!(name = enum_name, "enum not found");
        return not_found(ElementKind::Enum, enum_name);
    };

    let rows: Vec<Vec<String>> = en
        .elements
        .iter()
        .filter_map(|e| match e {
            Element::EnumValue(v) => Some(vec![
                format!("`{}`", v.name),
                extract_comments(&v.comments),
            ]),
            _ => None,
        })
        .collect();

    format!(
        "{}\n\n{}",
        extract_comments(&en.comments),
        github_table(&["Value", "Description"], &rows)
    )
}

/// Method table of a service. Streaming sides are prefixed with `stream`.
pub fn service_table(elements: &[Element], service_name: &str) -> String {
    let Some(service) = find_service(elements, service_name) else {
        tracing::warn!(name = service_name, "service not found");
        return not_found(ElementKind::Service, service_name);
    };

    let rows: Vec<Vec<String>> = service
        .elements
        .iter()
        .filter_map(|e| match e {
            Element::Method(m) => Some(m),
            _ => None,
        })
        .map(|method| {
            let mut request = format_type_for_docs(&method.input_type.type_name, false, None);
            if method.input_type.stream {
                request = format!("stream {request}");
            }
            let mut response = format_type_for_docs(&method.output_type.type_name, false, None);
            if method.output_type.stream {
                response = format!("stream {response}");
            }
            vec![
                format!("`{}`", method.name),
                request,
                response,
                extract_comments(&method.comments),
            ]
        })
        .collect();

    if rows.is_empty() {
        return NONE.to_string();
    }

    github_table(&["Method", "Request", "Response", "Description"], &rows)
}
