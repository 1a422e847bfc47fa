mod comments;
mod model;

use pest::Parser as _;
use pest::iterators::Pair;
use pest_derive::Parser;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub use comments::{attach_comments, find_type};
pub use model::*;

#[derive(Parser)]
#[grammar = "resources/proto.pest"] // Path relative to src/
pub struct ProtoParser;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Pest(#[from] Box<pest::error::Error<Rule>>),
    #[error("{0}")]
    Message(&'static str),
}

impl From<pest::error::Error<Rule>> for ParseError {
    fn from(e: pest::error::Error<Rule>) -> Self {
        Self::Pest(Box::new(e))
    }
}

impl ProtoFile {
    /// See [`attach_comments`].
    pub fn attach_comments(&mut self) {
        attach_comments(&mut self.elements);
    }
}

pub fn find_message<'a>(elements: &'a [Element], name: &str) -> Option<&'a Message> {
    match find_type(elements, name, ElementKind::Message) {
        Some(Element::Message(m)) => Some(m),
        _ => None,
    }
}

pub fn find_enum<'a>(elements: &'a [Element], name: &str) -> Option<&'a Enum> {
    match find_type(elements, name, ElementKind::Enum) {
        Some(Element::Enum(e)) => Some(e),
        _ => None,
    }
}

pub fn find_service<'a>(elements: &'a [Element], name: &str) -> Option<&'a Service> {
    match find_type(elements, name, ElementKind::Service) {
        Some(Element::Service(s)) => Some(s),
        _ => None,
    }
}

// Public API: parse a .proto file into the element tree.
// Comments are kept as `Element::Comment` nodes; nothing is attached yet.
pub fn parse_proto_file<P: AsRef<Path>>(path: P) -> Result<ProtoFile, ParseError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "reading proto file");
    let content = fs::read_to_string(path)?;
    parse_proto_str(&content)
}

pub fn parse_proto_str(content: &str) -> Result<ProtoFile, ParseError> {
    let mut pairs = ProtoParser::parse(Rule::proto, content)?;
    let proto_pair = pairs
        .next()
        .ok_or(ParseError::Message("expected proto root"))?;
    let file = ProtoFile {
        elements: parse_elements(proto_pair),
    };
    tracing::debug!(elements = file.elements.len(), "parsed proto file");
    Ok(file)
}

/// Builds the element list from the children of the file pair or of a
/// `*_body` pair. Keyword and name tokens are skipped.
fn parse_elements(pair: Pair<Rule>) -> Vec<Element> {
    pair.into_inner().filter_map(parse_element).collect()
}

// Elements inside the block's braces. Anything between the declaration and
// its `{` (comments included) is not part of the body.
fn parse_body(block: Pair<Rule>, body: Rule) -> Vec<Element> {
    block
        .into_inner()
        .find(|p| p.as_rule() == body)
        .map(parse_elements)
        .unwrap_or_default()
}

fn parse_element(pair: Pair<Rule>) -> Option<Element> {
    let el = match pair.as_rule() {
        Rule::COMMENT => Element::Comment(Comment {
            text: pair.as_str().to_string(),
        }),
        Rule::syntax => Element::Syntax(Syntax {
            value: string_child(pair),
            ..Default::default()
        }),
        Rule::edition => Element::Edition(Edition {
            value: string_child(pair),
            ..Default::default()
        }),
        Rule::package => Element::Package(Package {
            name: child_str(pair, Rule::full_ident),
            ..Default::default()
        }),
        Rule::import => Element::Import(parse_import(pair)),
        Rule::option => Element::Option(parse_option(pair)),
        Rule::message => Element::Message(parse_message(pair)),
        Rule::enum_def => Element::Enum(parse_enum(pair)),
        Rule::enum_value => Element::EnumValue(parse_enum_value(pair)),
        Rule::service => Element::Service(parse_service(pair)),
        Rule::rpc => Element::Method(parse_method(pair)),
        Rule::field => Element::Field(parse_field(pair)),
        Rule::map_field => Element::MapField(parse_map_field(pair)),
        Rule::oneof => Element::OneOf(parse_oneof(pair)),
        Rule::group => Element::Group(parse_group(pair)),
        Rule::reserved => Element::Reserved(Reserved {
            ranges: child_str(pair, Rule::range_body).trim().to_string(),
            ..Default::default()
        }),
        Rule::extensions => Element::Extensions(Extensions {
            ranges: child_str(pair, Rule::range_body).trim().to_string(),
            ..Default::default()
        }),
        Rule::extend => Element::Extend(parse_extend(pair)),
        _ => return None,
    };
    Some(el)
}

fn child_str(pair: Pair<Rule>, rule: Rule) -> String {
    pair.into_inner()
        .find(|p| p.as_rule() == rule)
        .map(|p| p.as_str().to_string())
        .unwrap_or_default()
}

// Contents of the first string literal child, quotes removed.
fn string_child(pair: Pair<Rule>) -> String {
    unquote(&child_str(pair, Rule::string_lit)).to_string()
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|r| r.strip_suffix('"'))
        .or_else(|| s.strip_prefix('\'').and_then(|r| r.strip_suffix('\'')))
        .unwrap_or(s)
}

fn parse_import(pair: Pair<Rule>) -> Import {
    let mut import = Import::default();
    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::import_modifier => {
                import.modifier = match p.as_str() {
                    "weak" => Some(ImportModifier::Weak),
                    _ => Some(ImportModifier::Public),
                };
            }
            Rule::string_lit => import.path = unquote(p.as_str()).to_string(),
            _ => {}
        }
    }
    import
}

fn parse_option(pair: Pair<Rule>) -> OptionEntry {
    // option = { "option" ~ option_name ~ "=" ~ constant ~ ";" }
    // field_option = { option_name ~ "=" ~ constant }
    let mut entry = OptionEntry::default();
    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::option_name => entry.name = p.as_str().to_string(),
            Rule::constant => entry.value = p.as_str().to_string(),
            _ => {}
        }
    }
    entry
}

fn parse_field_options(pair: Pair<Rule>) -> Vec<OptionEntry> {
    pair.into_inner()
        .filter(|p| p.as_rule() == Rule::field_option)
        .map(parse_option)
        .collect()
}

// ---------------- Message ----------------

fn parse_message(block: Pair<Rule>) -> Message {
    // message = { "message" ~ ident ~ message_body }
    let name = child_str(block.clone(), Rule::ident);
    Message {
        name,
        elements: parse_body(block, Rule::message_body),
        comments: Vec::new(),
    }
}

fn parse_field(pair: Pair<Rule>) -> Field {
    // field = { label? ~ type_ref ~ ident ~ "=" ~ field_number ~ field_options? ~ ";" }
    let mut field = Field {
        name: String::new(),
        number: 0,
        ty: FieldType::Custom(String::new()),
        cardinality: None,
        options: Vec::new(),
        comments: Vec::new(),
    };

    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::label => field.cardinality = Some(parse_label(p.as_str())),
            Rule::type_ref => field.ty = parse_type_reference(p.as_str()),
            Rule::ident => field.name = p.as_str().to_string(),
            Rule::field_number => {
                field.number = u32::try_from(parse_integer_value(p.as_str())).unwrap_or(0);
            }
            Rule::field_options => field.options = parse_field_options(p),
            _ => {}
        }
    }
    field
}

fn parse_label(s: &str) -> FieldCardinality {
    match s {
        "repeated" => FieldCardinality::Repeated,
        "required" => FieldCardinality::Required,
        _ => FieldCardinality::Optional,
    }
}

fn parse_group(block: Pair<Rule>) -> Group {
    // group = { label? ~ "group" ~ ident ~ "=" ~ field_number ~ field_options? ~ message_body }
    let mut group = Group::default();
    for p in block.into_inner() {
        match p.as_rule() {
            Rule::label => group.cardinality = Some(parse_label(p.as_str())),
            Rule::ident => group.name = p.as_str().to_string(),
            Rule::field_number => {
                group.number = u32::try_from(parse_integer_value(p.as_str())).unwrap_or(0);
            }
            Rule::field_options => group.options = parse_field_options(p),
            Rule::message_body => group.elements = parse_elements(p),
            _ => {}
        }
    }
    group
}

fn parse_map_field(pair: Pair<Rule>) -> MapField {
    // map_field = { "map" ~ "<" ~ type_ref ~ "," ~ type_ref ~ ">" ~ ident ~ "=" ~ field_number ~ field_options? ~ ";" }
    let mut types = Vec::with_capacity(2);
    let mut name = String::new();
    let mut number = 0;
    let mut options = Vec::new();

    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::type_ref => types.push(parse_type_reference(p.as_str())),
            Rule::ident => name = p.as_str().to_string(),
            Rule::field_number => {
                number = u32::try_from(parse_integer_value(p.as_str())).unwrap_or(0);
            }
            Rule::field_options => options = parse_field_options(p),
            _ => {}
        }
    }

    let mut types = types.into_iter();
    let key_type = types
        .next()
        .unwrap_or(FieldType::Scalar(ScalarType::String));
    let value_type = types
        .next()
        .unwrap_or(FieldType::Scalar(ScalarType::String));

    MapField {
        name,
        number,
        key_type,
        value_type,
        options,
        comments: Vec::new(),
    }
}

fn parse_oneof(block: Pair<Rule>) -> OneOf {
    // oneof = { "oneof" ~ ident ~ oneof_body }
    let name = child_str(block.clone(), Rule::ident);
    OneOf {
        name,
        elements: parse_body(block, Rule::oneof_body),
        comments: Vec::new(),
    }
}

fn parse_extend(block: Pair<Rule>) -> Extend {
    let type_name = child_str(block.clone(), Rule::type_ref);
    Extend {
        type_name: parse_type_reference(&type_name).to_string(),
        elements: parse_body(block, Rule::extend_body),
        comments: Vec::new(),
    }
}

fn parse_type_reference(s: &str) -> FieldType {
    // type_ref = @{ "."? ~ full_ident }
    match ScalarType::parse(s) {
        Some(scalar) => FieldType::Scalar(scalar),
        None => FieldType::Custom(s.strip_prefix('.').unwrap_or(s).to_string()),
    }
}

// ---------------- Enum ----------------

fn parse_enum(block: Pair<Rule>) -> Enum {
    // enum_def = { "enum" ~ ident ~ enum_body }
    let name = child_str(block.clone(), Rule::ident);
    Enum {
        name,
        elements: parse_body(block, Rule::enum_body),
        comments: Vec::new(),
    }
}

fn parse_enum_value(pair: Pair<Rule>) -> EnumValue {
    // enum_value = { ident ~ "=" ~ enum_number ~ field_options? ~ ";" }
    let mut value = EnumValue::default();
    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::ident => value.name = p.as_str().to_string(),
            Rule::enum_number => {
                value.number = i32::try_from(parse_integer_value(p.as_str())).unwrap_or(0);
            }
            Rule::field_options => value.options = parse_field_options(p),
            _ => {}
        }
    }
    value
}

// ---------------- Service ----------------

fn parse_service(block: Pair<Rule>) -> Service {
    let name = child_str(block.clone(), Rule::ident);
    Service {
        name,
        elements: parse_body(block, Rule::service_body),
        comments: Vec::new(),
    }
}

fn parse_method(pair: Pair<Rule>) -> Method {
    // rpc = { "rpc" ~ ident ~ "(" ~ rpc_type ~ ")" ~ "returns" ~ "(" ~ rpc_type ~ ")" ~ (rpc_body | ";") }
    let mut method = Method::default();
    let mut signature = Vec::with_capacity(2);

    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::ident => method.name = p.as_str().to_string(),
            Rule::rpc_type => signature.push(parse_rpc_type(p)),
            Rule::rpc_body => method.elements = parse_elements(p),
            _ => {}
        }
    }

    let mut signature = signature.into_iter();
    method.input_type = signature.next().unwrap_or_default();
    method.output_type = signature.next().unwrap_or_default();
    method
}

fn parse_rpc_type(pair: Pair<Rule>) -> MessageType {
    // rpc_type = { stream? ~ type_ref }
    let mut ty = MessageType::default();
    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::stream => ty.stream = true,
            Rule::type_ref => ty.type_name = parse_type_reference(p.as_str()).to_string(),
            _ => {}
        }
    }
    ty
}

fn parse_integer_value(s: &str) -> i64 {
    // dec|hex|oct with optional minus
    let (neg, rest) = match s.strip_prefix('-') {
        Some(stripped) => (true, stripped),
        None => (false, s),
    };
    let val = if let Some(hex) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).unwrap_or(0)
    } else if rest.starts_with('0') && rest.len() > 1 {
        i64::from_str_radix(&rest[1..], 8).unwrap_or(0)
    } else {
        rest.parse::<i64>().unwrap_or(0)
    };
    if neg { -val } else { val }
}
