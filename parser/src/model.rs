// Element tree for .proto files.
// - A file is an ordered list of elements; declaration order is kept everywhere.
// - Comments are elements too, at the nesting level they were written at.
// - Every non-comment node carries `comments`, filled by `attach_comments`.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProtoFile {
    pub elements: Vec<Element>,
}

impl ProtoFile {
    pub fn package(&self) -> Option<&str> {
        self.elements.iter().find_map(|e| match e {
            Element::Package(p) => Some(p.name.as_str()),
            _ => None,
        })
    }

    pub fn syntax(&self) -> Option<&str> {
        self.elements.iter().find_map(|e| match e {
            Element::Syntax(s) => Some(s.value.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Comment(Comment),
    Syntax(Syntax),
    Edition(Edition),
    Package(Package),
    Import(Import),
    Option(OptionEntry),
    Message(Message),
    Enum(Enum),
    EnumValue(EnumValue),
    Service(Service),
    Method(Method),
    Field(Field),
    MapField(MapField),
    OneOf(OneOf),
    Group(Group),
    Reserved(Reserved),
    Extensions(Extensions),
    Extend(Extend),
}

/// Variant selector used by [`crate::find_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Message,
    Enum,
    Service,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Message => f.write_str("Message"),
            ElementKind::Enum => f.write_str("Enum"),
            ElementKind::Service => f.write_str("Service"),
        }
    }
}

impl Element {
    /// Declared name of the node, if it has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Element::Message(m) => Some(&m.name),
            Element::Enum(e) => Some(&e.name),
            Element::EnumValue(v) => Some(&v.name),
            Element::Service(s) => Some(&s.name),
            Element::Method(m) => Some(&m.name),
            Element::Field(f) => Some(&f.name),
            Element::MapField(f) => Some(&f.name),
            Element::OneOf(o) => Some(&o.name),
            Element::Group(g) => Some(&g.name),
            Element::Option(o) => Some(&o.name),
            _ => None,
        }
    }

    pub fn kind(&self) -> Option<ElementKind> {
        match self {
            Element::Message(_) => Some(ElementKind::Message),
            Element::Enum(_) => Some(ElementKind::Enum),
            Element::Service(_) => Some(ElementKind::Service),
            _ => None,
        }
    }

    /// Comments attached to this node. `None` for comment nodes themselves.
    pub fn comments(&self) -> Option<&[String]> {
        self.comments_ref().map(Vec::as_slice)
    }

    fn comments_ref(&self) -> Option<&Vec<String>> {
        Some(match self {
            Element::Comment(_) => return None,
            Element::Syntax(n) => &n.comments,
            Element::Edition(n) => &n.comments,
            Element::Package(n) => &n.comments,
            Element::Import(n) => &n.comments,
            Element::Option(n) => &n.comments,
            Element::Message(n) => &n.comments,
            Element::Enum(n) => &n.comments,
            Element::EnumValue(n) => &n.comments,
            Element::Service(n) => &n.comments,
            Element::Method(n) => &n.comments,
            Element::Field(n) => &n.comments,
            Element::MapField(n) => &n.comments,
            Element::OneOf(n) => &n.comments,
            Element::Group(n) => &n.comments,
            Element::Reserved(n) => &n.comments,
            Element::Extensions(n) => &n.comments,
            Element::Extend(n) => &n.comments,
        })
    }

    pub(crate) fn comments_mut(&mut self) -> Option<&mut Vec<String>> {
        Some(match self {
            Element::Comment(_) => return None,
            Element::Syntax(n) => &mut n.comments,
            Element::Edition(n) => &mut n.comments,
            Element::Package(n) => &mut n.comments,
            Element::Import(n) => &mut n.comments,
            Element::Option(n) => &mut n.comments,
            Element::Message(n) => &mut n.comments,
            Element::Enum(n) => &mut n.comments,
            Element::EnumValue(n) => &mut n.comments,
            Element::Service(n) => &mut n.comments,
            Element::Method(n) => &mut n.comments,
            Element::Field(n) => &mut n.comments,
            Element::MapField(n) => &mut n.comments,
            Element::OneOf(n) => &mut n.comments,
            Element::Group(n) => &mut n.comments,
            Element::Reserved(n) => &mut n.comments,
            Element::Extensions(n) => &mut n.comments,
            Element::Extend(n) => &mut n.comments,
        })
    }

    /// Nested elements of container nodes.
    pub fn children(&self) -> Option<&[Element]> {
        match self {
            Element::Message(n) => Some(&n.elements),
            Element::Enum(n) => Some(&n.elements),
            Element::Service(n) => Some(&n.elements),
            Element::Method(n) => Some(&n.elements),
            Element::OneOf(n) => Some(&n.elements),
            Element::Group(n) => Some(&n.elements),
            Element::Extend(n) => Some(&n.elements),
            _ => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<Element>> {
        match self {
            Element::Message(n) => Some(&mut n.elements),
            Element::Enum(n) => Some(&mut n.elements),
            Element::Service(n) => Some(&mut n.elements),
            Element::Method(n) => Some(&mut n.elements),
            Element::OneOf(n) => Some(&mut n.elements),
            Element::Group(n) => Some(&mut n.elements),
            Element::Extend(n) => Some(&mut n.elements),
            _ => None,
        }
    }
}

// ---------------- File-level statements ----------------

/// Raw comment, delimiters included (`// text`, `/* text */`).
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Syntax {
    pub value: String,
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Edition {
    pub value: String,
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Package {
    pub name: String,
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportModifier {
    Weak,
    Public,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Import {
    pub path: String,
    pub modifier: Option<ImportModifier>,
    pub comments: Vec<String>,
}

/// `name = value` for both statement options and `[...]` field options.
/// The name is kept as written, e.g. `(google.api.field_behavior)`, and the
/// value is the raw constant text, e.g. `"fooBar"` or `REQUIRED`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OptionEntry {
    pub name: String,
    pub value: String,
    pub comments: Vec<String>,
}

// ---------------- Message & Fields ----------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Message {
    pub name: String,
    pub elements: Vec<Element>,
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCardinality {
    Optional,
    Required,
    Repeated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub number: u32,
    pub ty: FieldType,
    pub cardinality: Option<FieldCardinality>,
    pub options: Vec<OptionEntry>,
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapField {
    pub name: String,
    pub number: u32,
    pub key_type: FieldType,
    pub value_type: FieldType,
    pub options: Vec<OptionEntry>,
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OneOf {
    pub name: String,
    pub elements: Vec<Element>,
    pub comments: Vec<String>,
}

/// proto2 `group`: declares a nested type and a field of it. The body holds
/// the type's elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub name: String,
    pub number: u32,
    pub cardinality: Option<FieldCardinality>,
    pub options: Vec<OptionEntry>,
    pub elements: Vec<Element>,
    pub comments: Vec<String>,
}

/// Body of a `reserved` statement as written (`2, 15, 9 to 11`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reserved {
    pub ranges: String,
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Extensions {
    pub ranges: String,
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Extend {
    pub type_name: String,
    pub elements: Vec<Element>,
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Scalar(ScalarType),
    Custom(String), // type name as written, without a leading '.'
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Scalar(s) => s.as_str(),
            FieldType::Custom(name) => name,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Double,
    Float,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Sint32,
    Sint64,
    Fixed32,
    Fixed64,
    Sfixed32,
    Sfixed64,
    Bool,
    String,
    Bytes,
}

impl ScalarType {
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "double" => ScalarType::Double,
            "float" => ScalarType::Float,
            "int32" => ScalarType::Int32,
            "int64" => ScalarType::Int64,
            "uint32" => ScalarType::Uint32,
            "uint64" => ScalarType::Uint64,
            "sint32" => ScalarType::Sint32,
            "sint64" => ScalarType::Sint64,
            "fixed32" => ScalarType::Fixed32,
            "fixed64" => ScalarType::Fixed64,
            "sfixed32" => ScalarType::Sfixed32,
            "sfixed64" => ScalarType::Sfixed64,
            "bool" => ScalarType::Bool,
            "string" => ScalarType::String,
            "bytes" => ScalarType::Bytes,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarType::Double => "double",
            ScalarType::Float => "float",
            ScalarType::Int32 => "int32",
            ScalarType::Int64 => "int64",
            ScalarType::Uint32 => "uint32",
            ScalarType::Uint64 => "uint64",
            ScalarType::Sint32 => "sint32",
            ScalarType::Sint64 => "sint64",
            ScalarType::Fixed32 => "fixed32",
            ScalarType::Fixed64 => "fixed64",
            ScalarType::Sfixed32 => "sfixed32",
            ScalarType::Sfixed64 => "sfixed64",
            ScalarType::Bool => "bool",
            ScalarType::String => "string",
            ScalarType::Bytes => "bytes",
        }
    }
}

// ---------------- Enum ----------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Enum {
    pub name: String,
    pub elements: Vec<Element>,
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnumValue {
    pub name: String,
    pub number: i32,
    pub options: Vec<OptionEntry>,
    pub comments: Vec<String>,
}

// ---------------- Service ----------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Service {
    pub name: String,
    pub elements: Vec<Element>,
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MessageType {
    pub type_name: String,
    pub stream: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Method {
    pub name: String,
    pub input_type: MessageType,
    pub output_type: MessageType,
    pub elements: Vec<Element>,
    pub comments: Vec<String>,
}
