//! acsets - attributed C-sets as a generic, schema-driven store
//!
//! A [`Schema`] names tables (objects), foreign keys between them
//! (morphisms) and typed data columns (attributes). An [`ACSet`] holds the
//! rows of every table and the cells of every column, and serializes to a
//! canonical JSON document that round-trips exactly.
//!
//! # Example
//!
//! ```
//! use acsets::petri::{Petri, PetriSchema};
//! use acsets::petri::schemas::attr_sname;
//! use acsets::codec::CodecConfig;
//! use serde_json::json;
//!
//! let mut sir = Petri::new(PetriSchema::LabelledPetriNet).unwrap();
//! sir.add_species(3).unwrap();
//! sir.add_transitions(&[(vec![0, 1], vec![1, 1]), (vec![1], vec![2])]).unwrap();
//! sir.set_subpart(0, attr_sname(), json!("susceptible")).unwrap();
//!
//! let text = sir.to_json_str(&CodecConfig::new()).unwrap();
//! let back = Petri::read_json(sir.schema().clone(), &text).unwrap();
//! assert_eq!(back, sir);
//! ```

pub mod codec;
pub mod error;
pub mod files;
pub mod interchange;
pub mod petri;
pub mod schema;
pub mod store;

pub use error::{AcsetError, AcsetResult, StructuralError, ValidationError};
pub use schema::{Attr, AttrType, Hom, Ob, Property, Schema, SchemaBuilder, SchemaError, ValueKind};
pub use store::{ACSet, SharedACSet};
