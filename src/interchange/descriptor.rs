//! Portable schema descriptors.
//!
//! The descriptor layout follows Catlab's JSON schema format:
//!
//! ```text
//! {
//!   "version": {"ACSetSchema": "0.0.1", "Catlab": "0.14.12"},
//!   "Ob":       [{"name": "V"}, ...],
//!   "Hom":      [{"name": "src", "dom": "E", "codom": "V"}, ...],
//!   "AttrType": [{"name": "Label", "ty": "text"}, ...],
//!   "Attr":     [{"name": "vlabel", "dom": "V", "codom": "Label"}, ...]
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::codec::CodecConfig;
use crate::error::AcsetResult;
use crate::schema::{Attr, AttrType, Hom, Ob, Schema, VersionSpec};

/// Serialized form of a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    #[serde(default)]
    pub version: VersionSpec,
    #[serde(rename = "Ob", default)]
    pub obs: Vec<Ob>,
    #[serde(rename = "Hom", default)]
    pub homs: Vec<Hom>,
    #[serde(rename = "AttrType", default)]
    pub attrtypes: Vec<AttrType>,
    #[serde(rename = "Attr", default)]
    pub attrs: Vec<Attr>,
}

impl SchemaDescriptor {
    /// Describe a schema.
    pub fn from_schema(schema: &Schema) -> Self {
        Self {
            version: schema.version().clone(),
            obs: schema.obs().to_vec(),
            homs: schema.homs().to_vec(),
            attrtypes: schema.attrtypes().to_vec(),
            attrs: schema.attrs().to_vec(),
        }
    }

    /// Build and validate the described schema.
    pub fn into_schema(self, name: impl Into<String>) -> AcsetResult<Schema> {
        let name = name.into();
        // The version is informational: a mismatch is reported, not rejected.
        if self.version != VersionSpec::default() {
            warn!(
                schema = %name,
                acset_schema = %self.version.acset_schema,
                catlab = %self.version.catlab,
                "descriptor version differs from this crate's"
            );
        }
        let schema = Schema::with_version(
            name,
            self.version,
            self.obs,
            self.homs,
            self.attrtypes,
            self.attrs,
        )?;
        debug!(schema = %schema.name(), "loaded schema descriptor");
        Ok(schema)
    }
}

/// Serialize a schema to a descriptor document.
pub fn to_descriptor(schema: &Schema) -> AcsetResult<Value> {
    Ok(serde_json::to_value(SchemaDescriptor::from_schema(schema))?)
}

/// Rebuild a schema from a descriptor document.
pub fn from_descriptor(name: impl Into<String>, doc: &Value) -> AcsetResult<Schema> {
    let descriptor = SchemaDescriptor::deserialize(doc)?;
    descriptor.into_schema(name)
}

/// Serialize a schema to descriptor text.
pub fn to_descriptor_string(schema: &Schema, config: &CodecConfig) -> AcsetResult<String> {
    config.render(&to_descriptor(schema)?)
}

/// Rebuild a schema from descriptor text.
pub fn read_descriptor(name: impl Into<String>, text: &str) -> AcsetResult<Schema> {
    let descriptor: SchemaDescriptor = serde_json::from_str(text)?;
    descriptor.into_schema(name)
}
