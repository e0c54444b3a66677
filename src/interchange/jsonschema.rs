//! JSON-Schema generation for canonical instance documents.

use serde_json::{json, Map, Value};

use crate::schema::{ColumnKind, Ob, Property, Schema, ValueKind};

/// The JSON-Schema dialect produced here.
pub const DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";

/// Options for generated JSON-Schemas.
#[derive(Debug, Clone, Default)]
pub struct JsonSchemaOptions {
    /// Written as `$id` when set.
    pub uri: Option<String>,
    /// Whether row objects may carry keys the schema does not declare.
    pub additional_properties: bool,
}

impl JsonSchemaOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `$id` URI.
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set additional_properties flag.
    pub fn additional_properties(mut self, value: bool) -> Self {
        self.additional_properties = value;
        self
    }
}

/// Derive a JSON-Schema that accepts the canonical JSON documents of
/// acsets over `schema`, with an optional `$id`.
pub fn json_schema(schema: &Schema, uri: Option<&str>) -> Value {
    let mut options = JsonSchemaOptions::new();
    options.uri = uri.map(str::to_string);
    derive_json_schema(schema, &options)
}

/// Derive a JSON-Schema with explicit options.
///
/// Every object becomes a definition for its row type, and the document
/// holds an array of those rows under each object's name.
pub fn derive_json_schema(schema: &Schema, options: &JsonSchemaOptions) -> Value {
    let mut doc = Map::new();
    doc.insert("$schema".into(), json!(DRAFT_07));
    if let Some(uri) = &options.uri {
        doc.insert("$id".into(), json!(uri));
    }
    doc.insert("title".into(), json!(schema.name()));
    doc.insert("type".into(), json!("object"));

    let mut tables = Map::new();
    let mut definitions = Map::new();
    for ob in schema.obs() {
        tables.insert(
            ob.name.clone(),
            json!({
                "title": ob.title.as_deref().unwrap_or(&ob.name),
                "type": "array",
                "items": {"$ref": format!("#/definitions/{}", ob.name)}
            }),
        );
        definitions.insert(ob.name.clone(), row_schema(schema, ob, options));
    }

    let required: Vec<&str> = schema.obs().iter().map(|ob| ob.name.as_str()).collect();
    doc.insert("properties".into(), Value::Object(tables));
    doc.insert("required".into(), json!(required));
    doc.insert("definitions".into(), Value::Object(definitions));
    Value::Object(doc)
}

fn row_schema(schema: &Schema, ob: &Ob, options: &JsonSchemaOptions) -> Value {
    let mut row = Map::new();
    row.insert("title".into(), json!(ob.title.as_deref().unwrap_or(&ob.name)));
    if let Some(desc) = &ob.description {
        row.insert("description".into(), json!(desc));
    }
    row.insert("type".into(), json!("object"));

    let mut fields = Map::new();
    for prop in schema.props_outof(ob) {
        fields.insert(prop.name().to_string(), field_schema(schema, prop));
    }
    row.insert("properties".into(), Value::Object(fields));
    row.insert(
        "additionalProperties".into(),
        json!(options.additional_properties),
    );
    Value::Object(row)
}

fn field_schema(schema: &Schema, prop: &Property) -> Value {
    let mut field = Map::new();
    field.insert("title".into(), json!(prop.title().unwrap_or(prop.name())));
    if let Some(desc) = prop.description() {
        field.insert("description".into(), json!(desc));
    }

    let kind = schema
        .property_position(prop)
        .ok()
        .map(|pos| schema.column(pos).kind);
    match kind {
        // one-based part index
        Some(ColumnKind::Hom { .. }) => {
            field.insert("type".into(), json!("integer"));
            field.insert("minimum".into(), json!(1));
        }
        Some(ColumnKind::Attr { kind }) => match value_type(kind) {
            Some(ty) => {
                field.insert("type".into(), ty);
            }
            // attribute values are never null
            None => {
                field.insert("not".into(), json!({"type": "null"}));
            }
        },
        None => {}
    }
    Value::Object(field)
}

fn value_type(kind: ValueKind) -> Option<Value> {
    match kind {
        ValueKind::Text => Some(json!("string")),
        ValueKind::Number => Some(json!("number")),
        ValueKind::Integer => Some(json!("integer")),
        ValueKind::Boolean => Some(json!("boolean")),
        ValueKind::Json => Some(json!(["object", "array"])),
        ValueKind::Any => None,
    }
}
