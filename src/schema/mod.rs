//! Schema module.
//!
//! A schema declares the tables of an acset (objects), the foreign-key
//! columns between them (morphisms), and the typed value columns
//! (attributes) together with their attribute types.

mod schema;
mod types;

pub use schema::{Element, Schema, SchemaBuilder, SchemaError, VersionSpec};
pub use types::{Attr, AttrType, Hom, Ob, Property, ValueKind};

pub(crate) use schema::ColumnKind;
pub(crate) use types::describe;
