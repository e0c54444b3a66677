//! Canonical JSON encoding of acsets.
//!
//! A document is an object with one key per object of the schema, in
//! declaration order. Each key holds the rows of that table in part order;
//! each row holds only the properties set on it. Morphism values are
//! written one-based, attribute values as they are.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use super::config::CodecConfig;
use crate::error::{AcsetResult, StructuralError, ValidationError};
use crate::schema::{describe, Element, Ob, Property, Schema};
use crate::store::ACSet;

/// Encode an acset as a canonical JSON document.
pub fn encode(acs: &ACSet) -> AcsetResult<Value> {
    let mut doc = Map::new();
    for ob in acs.schema().obs() {
        let rows = acs
            .parts(ob)?
            .map(|i| acs.prop_dict(ob, i).map(Value::Object))
            .collect::<AcsetResult<Vec<_>>>()?;
        doc.insert(ob.name.clone(), Value::Array(rows));
    }
    debug!(acset = %acs.name(), "encoded acset");
    Ok(Value::Object(doc))
}

/// Decode a canonical JSON document into a fresh acset.
///
/// Table and column names are resolved with [`Schema::from_string`]. Rows
/// are appended in array order, so row positions become part indices. All
/// tables are sized before any value is set, so a morphism may point into a
/// table that comes later in the document.
pub fn decode(
    name: impl Into<String>,
    schema: impl Into<Arc<Schema>>,
    doc: &Value,
) -> AcsetResult<ACSet> {
    let mut acs = ACSet::new(name, schema);
    let schema = Arc::clone(acs.schema());

    let tables = doc.as_object().ok_or_else(|| StructuralError::NotAnObject {
        context: "instance document".into(),
    })?;

    let mut pending = Vec::with_capacity(tables.len());
    for (obname, rows) in tables {
        let ob = match schema.from_string(obname) {
            Some(Element::Ob(ob)) => ob,
            Some(_) => return Err(StructuralError::NotAnOb(obname.clone()).into()),
            None => return Err(StructuralError::UnresolvedName(obname.clone()).into()),
        };
        let rows = rows.as_array().ok_or_else(|| StructuralError::NotAnArray {
            ob: obname.clone(),
        })?;
        let parts = acs.add_parts(ob, rows.len())?;
        pending.push((ob, parts, rows));
    }

    for (ob, parts, rows) in pending {
        for (i, row) in parts.zip(rows) {
            let props = row.as_object().ok_or_else(|| StructuralError::NotAnObject {
                context: format!("row {} of '{}'", i, ob.name),
            })?;
            for (fname, value) in props {
                let f = resolve_property(&schema, ob, fname)?;
                let value = match &f {
                    Property::Hom(_) => from_one_based(&f, value)?,
                    Property::Attr(_) => value.clone(),
                };
                acs.set_subpart(i, f, value)?;
            }
        }
    }

    debug!(acset = %acs.name(), "decoded acset");
    Ok(acs)
}

/// Encode an acset as JSON text.
pub fn to_json_string(acs: &ACSet, config: &CodecConfig) -> AcsetResult<String> {
    config.render(&encode(acs)?)
}

/// Decode an acset from JSON text.
pub fn read_json(
    name: impl Into<String>,
    schema: impl Into<Arc<Schema>>,
    text: &str,
) -> AcsetResult<ACSet> {
    let doc: Value = serde_json::from_str(text)?;
    decode(name, schema, &doc)
}

fn resolve_property(schema: &Schema, ob: &Ob, name: &str) -> AcsetResult<Property> {
    let prop = match schema.from_string(name) {
        Some(Element::Hom(hom)) => Property::from(hom),
        Some(Element::Attr(attr)) => Property::from(attr),
        Some(Element::Ob(_)) | Some(Element::AttrType(_)) => {
            return Err(StructuralError::NotAProperty {
                name: name.to_string(),
                ob: ob.name.clone(),
            }
            .into())
        }
        None => return Err(StructuralError::UnresolvedName(name.to_string()).into()),
    };
    if prop.dom() != ob.name {
        return Err(StructuralError::WrongDomain {
            property: name.to_string(),
            ob: ob.name.clone(),
        }
        .into());
    }
    Ok(prop)
}

fn from_one_based(f: &Property, value: &Value) -> Result<Value, ValidationError> {
    match value.as_u64() {
        Some(n) if n >= 1 => Ok(Value::from(n - 1)),
        _ => Err(ValidationError::NotAPart {
            hom: f.name().to_string(),
            value: describe(value),
        }),
    }
}

impl ACSet {
    /// Encode this acset as a canonical JSON document.
    pub fn to_json_obj(&self) -> AcsetResult<Value> {
        encode(self)
    }

    /// Encode this acset as JSON text.
    pub fn to_json_str(&self, config: &CodecConfig) -> AcsetResult<String> {
        to_json_string(self, config)
    }

    /// Decode an acset from JSON text.
    pub fn read_json(
        name: impl Into<String>,
        schema: impl Into<Arc<Schema>>,
        text: &str,
    ) -> AcsetResult<Self> {
        read_json(name, schema, text)
    }
}
