//! Petri nets, the stock example of an acset.

mod net;
pub mod schemas;

pub use net::{Petri, TransitionSpec};
pub use schemas::PetriSchema;
