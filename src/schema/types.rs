//! Schema elements: objects, morphisms, attribute types and attributes.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The kind of JSON value an attribute type accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Strings.
    Text,
    /// Any JSON number, integral or not.
    Number,
    /// Integral numbers only.
    Integer,
    /// Booleans.
    Boolean,
    /// JSON objects or arrays, kept opaque.
    Json,
    /// Any non-null JSON value.
    #[default]
    Any,
}

impl ValueKind {
    /// Check if a JSON value matches this kind.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => false,
            (ValueKind::Text, Value::String(_)) => true,
            (ValueKind::Number, Value::Number(_)) => true,
            (ValueKind::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (ValueKind::Boolean, Value::Bool(_)) => true,
            (ValueKind::Json, Value::Object(_) | Value::Array(_)) => true,
            (ValueKind::Any, _) => true,
            _ => false,
        }
    }

    /// Name used in descriptors and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Text => "text",
            ValueKind::Number => "number",
            ValueKind::Integer => "integer",
            ValueKind::Boolean => "boolean",
            ValueKind::Json => "json",
            ValueKind::Any => "any",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Short human-readable description of a JSON value's kind, for error messages.
pub(crate) fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string {:?}", s),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}

/// An object of a schema. Every object gets a table in an acset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ob {
    /// Table name, used as the key in serialized documents.
    pub name: String,
    /// Human-readable title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Longer free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Ob {
    /// Create a new object.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: None,
        }
    }

    /// Set the display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }
}

impl fmt::Display for Ob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A morphism `dom -> codom`: a foreign-key column on the `dom` table whose
/// values are part indices into the `codom` table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hom {
    /// Name used to look the element up and to key serialized fields.
    pub name: String,
    /// Name of the domain object.
    pub dom: String,
    /// Name of the codomain object.
    pub codom: String,
    /// Human-readable title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Longer free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Hom {
    /// Create a new morphism between two objects.
    pub fn new(name: impl Into<String>, dom: &Ob, codom: &Ob) -> Self {
        Self {
            name: name.into(),
            dom: dom.name.clone(),
            codom: codom.name.clone(),
            title: None,
            description: None,
        }
    }

    /// Set the display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }
}

impl fmt::Display for Hom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.name, self.dom, self.codom)
    }
}

/// A named attribute type. Acsets are polymorphic over attribute values; the
/// kind only fixes which JSON values a column will accept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttrType {
    /// Name used to look the element up and to key serialized fields.
    pub name: String,
    /// Kind of value the type accepts; `any` when omitted.
    #[serde(default)]
    pub ty: ValueKind,
    /// Human-readable title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Longer free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AttrType {
    /// Create a new attribute type.
    pub fn new(name: impl Into<String>, ty: ValueKind) -> Self {
        Self {
            name: name.into(),
            ty,
            title: None,
            description: None,
        }
    }

    /// Set the display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.ty)
    }
}

/// An attribute: a non-foreign-key column on the `dom` table holding values
/// of the `codom` attribute type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attr {
    /// Name used to look the element up and to key serialized fields.
    pub name: String,
    /// Name of the domain object.
    pub dom: String,
    /// Name of the attribute type.
    pub codom: String,
    /// Human-readable title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Longer free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Attr {
    /// Create a new attribute on an object.
    pub fn new(name: impl Into<String>, dom: &Ob, codom: &AttrType) -> Self {
        Self {
            name: name.into(),
            dom: dom.name.clone(),
            codom: codom.name.clone(),
            title: None,
            description: None,
        }
    }

    /// Set the display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.name, self.dom, self.codom)
    }
}

/// A column of a table: either a morphism or an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Property {
    Hom(Hom),
    Attr(Attr),
}

impl Property {
    /// Column name.
    pub fn name(&self) -> &str {
        match self {
            Property::Hom(h) => &h.name,
            Property::Attr(a) => &a.name,
        }
    }

    /// Name of the object whose table carries this column.
    pub fn dom(&self) -> &str {
        match self {
            Property::Hom(h) => &h.dom,
            Property::Attr(a) => &a.dom,
        }
    }

    /// Title of the underlying morphism or attribute.
    pub fn title(&self) -> Option<&str> {
        match self {
            Property::Hom(h) => h.title.as_deref(),
            Property::Attr(a) => a.title.as_deref(),
        }
    }

    /// Description of the underlying morphism or attribute.
    pub fn description(&self) -> Option<&str> {
        match self {
            Property::Hom(h) => h.description.as_deref(),
            Property::Attr(a) => a.description.as_deref(),
        }
    }

    /// Check if this column is a morphism.
    pub fn is_hom(&self) -> bool {
        matches!(self, Property::Hom(_))
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Property::Hom(h) => h.fmt(f),
            Property::Attr(a) => a.fmt(f),
        }
    }
}

impl From<Hom> for Property {
    fn from(hom: Hom) -> Self {
        Property::Hom(hom)
    }
}

impl From<&Hom> for Property {
    fn from(hom: &Hom) -> Self {
        Property::Hom(hom.clone())
    }
}

impl From<Attr> for Property {
    fn from(attr: Attr) -> Self {
        Property::Attr(attr)
    }
}

impl From<&Attr> for Property {
    fn from(attr: &Attr) -> Self {
        Property::Attr(attr.clone())
    }
}

impl From<&Property> for Property {
    fn from(prop: &Property) -> Self {
        prop.clone()
    }
}
