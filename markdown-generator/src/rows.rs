use parser::{Field, FieldCardinality, MapField, OptionEntry};

use crate::describe::extract_comments;
use crate::types::format_type_for_docs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requiredness {
    Yes,
    No,
    OneOf,
}

impl Requiredness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Requiredness::Yes => "Yes",
            Requiredness::No => "No",
            Requiredness::OneOf => "Optional (OneOf)",
        }
    }
}

/// One line of a message table. `name` and `ty` are already Markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow {
    pub name: String,
    pub ty: String,
    pub required: Requiredness,
    pub description: String,
}

impl FieldRow {
    pub fn into_cells(self) -> Vec<String> {
        vec![
            self.name,
            self.ty,
            self.required.as_str().to_string(),
            self.description,
        ]
    }
}

/// Plain or map field of a message.
#[derive(Debug, Clone, Copy)]
pub enum FieldRef<'a> {
    Field(&'a Field),
    Map(&'a MapField),
}

impl<'a> FieldRef<'a> {
    fn name(&self) -> &'a str {
        match self {
            FieldRef::Field(f) => &f.name,
            FieldRef::Map(m) => &m.name,
        }
    }

    fn options(&self) -> &'a [OptionEntry] {
        match self {
            FieldRef::Field(f) => &f.options,
            FieldRef::Map(m) => &m.options,
        }
    }

    fn comments(&self) -> &'a [String] {
        match self {
            FieldRef::Field(f) => &f.comments,
            FieldRef::Map(m) => &m.comments,
        }
    }

    fn cardinality(&self) -> Option<FieldCardinality> {
        match self {
            FieldRef::Field(f) => f.cardinality,
            FieldRef::Map(_) => None,
        }
    }
}

/// Converts a field into a table row.
pub fn process_field(field: FieldRef<'_>, is_oneof: bool) -> FieldRow {
    let options = field.options();
    let cardinality = field.cardinality();

    let json_name = options
        .iter()
        .find(|o| o.name == "json_name")
        .map(|o| o.value.trim_matches('"'))
        .filter(|name| !name.is_empty());
    let display_name = match json_name {
        Some(name) => name.to_string(),
        None => snake_to_camel_case(field.name()),
    };

    let ty = match field {
        FieldRef::Map(m) => format_type_for_docs(m.value_type.as_str(), false, Some(m.key_type.as_str())),
        FieldRef::Field(f) => format_type_for_docs(
            f.ty.as_str(),
            cardinality == Some(FieldCardinality::Repeated),
            None,
        ),
    };

    let has_required_behavior = options
        .iter()
        .filter(|o| o.name.contains("field_behavior"))
        .any(|o| o.value.contains("REQUIRED"));

    let required = if is_oneof {
        Requiredness::OneOf
    } else if cardinality == Some(FieldCardinality::Required) || has_required_behavior {
        Requiredness::Yes
    } else {
        Requiredness::No
    };

    FieldRow {
        name: format!("`{display_name}`"),
        ty,
        required,
        description: extract_comments(field.comments()),
    }
}

/// `task_status_update` -> `taskStatusUpdate`. Later segments are title-cased.
pub fn snake_to_camel_case(snake: &str) -> String {
    let mut components = snake.split('_');
    let mut out = components.next().unwrap_or_default().to_string();
    for component in components {
        out.push_str(&title_case(component));
    }
    out
}

// Upper-cases a letter that follows a non-letter, lower-cases the rest.
fn title_case(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut prev_cased = false;
    for c in segment.chars() {
        if prev_cased {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_cased = c.is_lowercase() || c.is_uppercase();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use parser::{FieldType, ScalarType};

    fn option(name: &str, value: &str) -> OptionEntry {
        OptionEntry {
            name: name.to_string(),
            value: value.to_string(),
            comments: Vec::new(),
        }
    }

    fn field(name: &str, ty: FieldType, cardinality: Option<FieldCardinality>) -> Field {
        Field {
            name: name.to_string(),
            number: 1,
            ty,
            cardinality,
            options: Vec::new(),
            comments: Vec::new(),
        }
    }

    #[test]
    fn camel_cases_snake_names() {
        assert_eq!(snake_to_camel_case("foo_bar"), "fooBar");
        assert_eq!(snake_to_camel_case("id"), "id");
        assert_eq!(snake_to_camel_case("push_notification_config"), "pushNotificationConfig");
        assert_eq!(snake_to_camel_case("api_KEY"), "apiKey");
        assert_eq!(snake_to_camel_case("oauth2_client_id"), "oauth2ClientId");
        assert_eq!(snake_to_camel_case("x_2fa"), "x2Fa");
    }

    #[test]
    fn json_name_option_wins_over_derived_name() {
        let mut f = field("foo_bar", FieldType::Scalar(ScalarType::String), None);
        f.options.push(option("json_name", "\"fooBarOverride\""));
        let row = process_field(FieldRef::Field(&f), false);
        assert_eq!(row.name, "`fooBarOverride`");
    }

    #[test]
    fn required_from_label_or_field_behavior() {
        let labelled = field(
            "a",
            FieldType::Scalar(ScalarType::Int32),
            Some(FieldCardinality::Required),
        );
        assert_eq!(process_field(FieldRef::Field(&labelled), false).required, Requiredness::Yes);

        let mut behavior = field("b", FieldType::Scalar(ScalarType::Int32), None);
        behavior
            .options
            .push(option("(google.api.field_behavior)", "REQUIRED"));
        assert_eq!(process_field(FieldRef::Field(&behavior), false).required, Requiredness::Yes);

        let mut output_only = field("c", FieldType::Scalar(ScalarType::Int32), None);
        output_only
            .options
            .push(option("(google.api.field_behavior)", "OUTPUT_ONLY"));
        assert_eq!(process_field(FieldRef::Field(&output_only), false).required, Requiredness::No);
    }

    #[test]
    fn oneof_members_are_never_required() {
        let mut f = field(
            "x",
            FieldType::Scalar(ScalarType::String),
            Some(FieldCardinality::Required),
        );
        f.options.push(option("(google.api.field_behavior)", "REQUIRED"));
        let row = process_field(FieldRef::Field(&f), true);
        assert_eq!(row.required, Requiredness::OneOf);
        assert_eq!(row.clone().into_cells()[2], "Optional (OneOf)");
    }

    #[test]
    fn repeated_and_map_types() {
        let mut f = field(
            "artifacts",
            FieldType::Custom("Artifact".into()),
            Some(FieldCardinality::Repeated),
        );
        f.comments.push("// Produced artifacts.".into());
        let row = process_field(FieldRef::Field(&f), false);
        assert_eq!(row.ty, "array of [`Artifact`](#artifact)");
        assert_eq!(row.description, "Produced artifacts.");

        let m = MapField {
            name: "counters".into(),
            number: 2,
            key_type: FieldType::Scalar(ScalarType::String),
            value_type: FieldType::Scalar(ScalarType::Int32),
            options: Vec::new(),
            comments: Vec::new(),
        };
        let row = process_field(FieldRef::Map(&m), false);
        assert_eq!(row.ty, "map of string to `integer`");
        assert_eq!(row.required, Requiredness::No);
    }
}
