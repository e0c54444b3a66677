//! Schema interchange: portable descriptors and derived JSON-Schemas.

mod descriptor;
mod jsonschema;

pub use descriptor::{
    from_descriptor, read_descriptor, to_descriptor, to_descriptor_string, SchemaDescriptor,
};
pub use jsonschema::{derive_json_schema, json_schema, JsonSchemaOptions, DRAFT_07};
