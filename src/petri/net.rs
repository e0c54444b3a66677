//! Petri nets as acsets, with helpers for adding species and transitions.

use std::ops::{Deref, DerefMut, Range};
use std::sync::Arc;

use serde_json::Value;

use super::schemas::{hom_is, hom_it, hom_os, hom_ot, input, output, species, transition, PetriSchema};
use crate::error::{AcsetResult, ValidationError};
use crate::schema::Schema;
use crate::store::ACSet;

/// A transition given by the species it consumes and the species it produces.
pub type TransitionSpec = (Vec<usize>, Vec<usize>);

/// An acset over one of the Petri net schemas.
///
/// Derefs to [`ACSet`], so the generic part/subpart API is available directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Petri {
    acs: ACSet,
}

impl Petri {
    /// Create an empty net over the given variant.
    pub fn new(variant: PetriSchema) -> AcsetResult<Self> {
        Ok(Self {
            acs: ACSet::new(variant.name(), variant.build()?),
        })
    }

    /// Create an empty net over an already built Petri schema.
    pub fn with_schema(name: impl Into<String>, schema: impl Into<Arc<Schema>>) -> Self {
        Self {
            acs: ACSet::new(name, schema),
        }
    }

    /// Decode a net from canonical JSON text.
    pub fn read_json(schema: impl Into<Arc<Schema>>, text: &str) -> AcsetResult<Self> {
        let schema = schema.into();
        let acs = ACSet::read_json(schema.name().to_string(), schema, text)?;
        Ok(Self { acs })
    }

    /// Add `n` species.
    pub fn add_species(&mut self, n: usize) -> AcsetResult<Range<usize>> {
        self.acs.add_parts(&species(), n)
    }

    /// Add transitions, wiring an input arc for every consumed species and an
    /// output arc for every produced species.
    ///
    /// All species indices are checked before anything is added.
    pub fn add_transitions(&mut self, transitions: &[TransitionSpec]) -> AcsetResult<Range<usize>> {
        let nspecies = self.acs.nparts(&species())?;
        let unknown = transitions
            .iter()
            .flat_map(|(ins, outs)| ins.iter().chain(outs))
            .find(|&&s| s >= nspecies);
        if let Some(&s) = unknown {
            return Err(ValidationError::PartOutOfRange {
                ob: species().name,
                part: s,
                nparts: nspecies,
            }
            .into());
        }

        let (it, is, ot, os) = (hom_it(), hom_is(), hom_ot(), hom_os());
        let (in_arc, out_arc) = (input(), output());
        let ts = self.acs.add_parts(&transition(), transitions.len())?;
        for (t, (ins, outs)) in ts.clone().zip(transitions) {
            for &s in ins {
                let arc = self.acs.add_part(&in_arc)?;
                self.acs.set_subpart(arc, &it, Value::from(t))?;
                self.acs.set_subpart(arc, &is, Value::from(s))?;
            }
            for &s in outs {
                let arc = self.acs.add_part(&out_arc)?;
                self.acs.set_subpart(arc, &ot, Value::from(t))?;
                self.acs.set_subpart(arc, &os, Value::from(s))?;
            }
        }
        Ok(ts)
    }

    /// Species consumed by transition `t`, one entry per input arc.
    pub fn inputs(&self, t: usize) -> AcsetResult<Vec<usize>> {
        let is = hom_is();
        self.acs
            .incident(&Value::from(t), hom_it())?
            .into_iter()
            .map(|arc| self.acs.hom_part(arc, &is))
            .collect()
    }

    /// Species produced by transition `t`, one entry per output arc.
    pub fn outputs(&self, t: usize) -> AcsetResult<Vec<usize>> {
        let os = hom_os();
        self.acs
            .incident(&Value::from(t), hom_ot())?
            .into_iter()
            .map(|arc| self.acs.hom_part(arc, &os))
            .collect()
    }

    pub fn into_acset(self) -> ACSet {
        self.acs
    }
}

impl Deref for Petri {
    type Target = ACSet;

    fn deref(&self) -> &ACSet {
        &self.acs
    }
}

impl DerefMut for Petri {
    fn deref_mut(&mut self) -> &mut ACSet {
        &mut self.acs
    }
}

impl From<Petri> for ACSet {
    fn from(petri: Petri) -> Self {
        petri.acs
    }
}
