//! JSON codec for acset instances.
//!
//! `decode(schema, encode(acs))` always gives back an acset equal to `acs`:
//! the same number of parts per table and the same set values.

mod config;
mod json;

pub use config::CodecConfig;
pub use json::{decode, encode, read_json, to_json_string};
