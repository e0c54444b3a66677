//! Generic acset storage.
//!
//! An [`ACSet`] keeps one append-only table per object of its schema and one
//! sparse column per property. All reads and writes are checked against the
//! schema: unknown objects or properties, out-of-range parts and values of
//! the wrong kind are rejected without touching the store.

mod acset;
mod shared;

pub use acset::ACSet;
pub use shared::SharedACSet;
