//! The acset itself: one table per object, one sparse column per property.

use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::trace;

use crate::error::{AcsetError, AcsetResult, ValidationError};
use crate::schema::{describe, ColumnKind, Ob, Property, Schema};

/// An attributed C-set: an in-memory relational store bound to a [`Schema`].
///
/// Rows ("parts") are dense zero-based indices that are only ever appended.
/// Each property is a sparse map from part to value; a missing entry means
/// the property is unset on that part. Morphism values always point at an
/// existing part of the codomain, since parts are never removed.
#[derive(Debug, Clone)]
pub struct ACSet {
    name: String,
    schema: Arc<Schema>,
    /// Part count per object, indexed like `schema.obs()`.
    parts: Vec<usize>,
    /// Column per property, indexed like `schema.properties()`.
    subparts: Vec<BTreeMap<usize, Value>>,
}

impl ACSet {
    /// Create an empty acset over a schema.
    pub fn new(name: impl Into<String>, schema: impl Into<Arc<Schema>>) -> Self {
        let schema = schema.into();
        Self {
            name: name.into(),
            parts: vec![0; schema.obs().len()],
            subparts: vec![BTreeMap::new(); schema.properties().len()],
            schema,
        }
    }

    /// Name of this acset.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The schema this acset is bound to.
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Append `n` parts to the table of `ob`, returning their indices.
    pub fn add_parts(&mut self, ob: &Ob, n: usize) -> AcsetResult<Range<usize>> {
        let pos = self.schema.ob_position(ob)?;
        let start = self.parts[pos];
        let end = start
            .checked_add(n)
            .ok_or_else(|| ValidationError::TooManyParts {
                ob: ob.name.clone(),
                nparts: start,
                requested: n,
            })?;
        self.parts[pos] = end;
        trace!(ob = %ob, start, n, "added parts");
        Ok(start..end)
    }

    /// Append a single part to the table of `ob`.
    pub fn add_part(&mut self, ob: &Ob) -> AcsetResult<usize> {
        Ok(self.add_parts(ob, 1)?.start)
    }

    /// Number of parts in the table of `ob`.
    pub fn nparts(&self, ob: &Ob) -> AcsetResult<usize> {
        Ok(self.parts[self.schema.ob_position(ob)?])
    }

    /// Indices of all parts of `ob` as of this call.
    pub fn parts(&self, ob: &Ob) -> AcsetResult<Range<usize>> {
        Ok(0..self.nparts(ob)?)
    }

    /// Set or clear the value of property `f` on part `i`.
    ///
    /// Passing `None` removes any existing value. Morphism values must be the
    /// index of an existing part of the codomain; attribute values must match
    /// the kind of their attribute type. Nothing changes when a check fails.
    pub fn set_subpart(
        &mut self,
        i: usize,
        f: impl Into<Property>,
        value: impl Into<Option<Value>>,
    ) -> AcsetResult<()> {
        let f = f.into();
        let pos = self.schema.property_position(&f)?;
        self.check_part(pos, i)?;

        match value.into() {
            None => {
                self.subparts[pos].remove(&i);
            }
            Some(value) => {
                let value = self.check_value(pos, &f, &value)?;
                self.subparts[pos].insert(i, value);
            }
        }
        Ok(())
    }

    /// Check whether property `f` is set on part `i`.
    pub fn has_subpart(&self, i: usize, f: impl Into<Property>) -> AcsetResult<bool> {
        let pos = self.schema.property_position(&f.into())?;
        Ok(self.subparts[pos].contains_key(&i))
    }

    /// Get the value of property `f` on part `i`.
    ///
    /// Morphism values are zero-based part indices.
    pub fn subpart(&self, i: usize, f: impl Into<Property>) -> AcsetResult<&Value> {
        let f = f.into();
        let pos = self.schema.property_position(&f)?;
        self.subparts[pos]
            .get(&i)
            .ok_or_else(|| AcsetError::MissingValue {
                property: f.name().to_string(),
                part: i,
            })
    }

    /// Get the value of property `f` on part `i`, with morphism values
    /// shifted to the one-based convention of serialized documents.
    pub fn subpart_one_indexed(&self, i: usize, f: impl Into<Property>) -> AcsetResult<Value> {
        let f = f.into();
        let value = self.subpart(i, &f)?;
        match (&f, value.as_u64()) {
            (Property::Hom(_), Some(part)) => Ok(Value::from(part + 1)),
            _ => Ok(value.clone()),
        }
    }

    /// Get the part that morphism `f` sends part `i` to.
    pub fn hom_part(&self, i: usize, f: impl Into<Property>) -> AcsetResult<usize> {
        let f = f.into();
        let value = self.subpart(i, &f)?;
        Ok(Self::part_index(&f, value)?)
    }

    /// All parts of the domain of `f` whose value under `f` equals `value`.
    ///
    /// This is a linear scan; no reverse index is kept.
    pub fn incident(&self, value: &Value, f: impl Into<Property>) -> AcsetResult<Vec<usize>> {
        let f = f.into();
        let pos = self.schema.property_position(&f)?;
        let target = match self.schema.column(pos).kind {
            ColumnKind::Hom { .. } => Value::from(Self::part_index(&f, value)?),
            ColumnKind::Attr { kind } => {
                if !kind.matches(value) {
                    return Err(ValidationError::WrongKind {
                        attr: f.name().to_string(),
                        expected: kind,
                        found: describe(value),
                    }
                    .into());
                }
                value.clone()
            }
        };

        let column = &self.subparts[pos];
        let dom = self.schema.column(pos).dom;
        Ok((0..self.parts[dom])
            .filter(|i| column.get(i) == Some(&target))
            .collect())
    }

    /// The set properties of part `i` of `ob`, keyed by property name, with
    /// morphism values one-based. This is one row of a serialized document.
    pub fn prop_dict(&self, ob: &Ob, i: usize) -> AcsetResult<Map<String, Value>> {
        let mut row = Map::new();
        for f in self.schema.props_outof(ob) {
            if self.has_subpart(i, f)? {
                row.insert(f.name().to_string(), self.subpart_one_indexed(i, f)?);
            }
        }
        Ok(row)
    }

    /// Reject part indices past the end of the property's domain table.
    fn check_part(&self, pos: usize, i: usize) -> Result<(), ValidationError> {
        let dom = self.schema.column(pos).dom;
        let nparts = self.parts[dom];
        if i >= nparts {
            return Err(ValidationError::PartOutOfRange {
                ob: self.schema.obs()[dom].name.clone(),
                part: i,
                nparts,
            });
        }
        Ok(())
    }

    /// Check a value against its column, returning the value to store.
    fn check_value(&self, pos: usize, f: &Property, value: &Value) -> Result<Value, ValidationError> {
        match self.schema.column(pos).kind {
            ColumnKind::Hom { codom } => {
                let part = Self::part_index(f, value)?;
                let nparts = self.parts[codom];
                if part >= nparts {
                    return Err(ValidationError::PartOutOfRange {
                        ob: self.schema.obs()[codom].name.clone(),
                        part,
                        nparts,
                    });
                }
                Ok(Value::from(part))
            }
            ColumnKind::Attr { kind } => {
                if !kind.matches(value) {
                    return Err(ValidationError::WrongKind {
                        attr: f.name().to_string(),
                        expected: kind,
                        found: describe(value),
                    });
                }
                Ok(value.clone())
            }
        }
    }

    fn part_index(f: &Property, value: &Value) -> Result<usize, ValidationError> {
        value
            .as_u64()
            .and_then(|part| usize::try_from(part).ok())
            .ok_or_else(|| ValidationError::NotAPart {
                hom: f.name().to_string(),
                value: describe(value),
            })
    }
}

/// Observational equality: same schema content, same part counts and the
/// same set values. The acset names are not compared.
impl PartialEq for ACSet {
    fn eq(&self, other: &Self) -> bool {
        self.schema.same_content(&other.schema)
            && self.parts == other.parts
            && self.subparts == other.subparts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Attr, AttrType, Hom, SchemaBuilder, SchemaError, ValueKind};
    use serde_json::json;

    struct Graph {
        v: Ob,
        e: Ob,
        src: Hom,
        tgt: Hom,
        vlabel: Attr,
        weight: Attr,
        schema: Arc<Schema>,
    }

    fn graph() -> Graph {
        let v = Ob::new("V");
        let e = Ob::new("E");
        let label = AttrType::new("Label", ValueKind::Text);
        let num = AttrType::new("Weight", ValueKind::Number);
        let src = Hom::new("src", &e, &v);
        let tgt = Hom::new("tgt", &e, &v);
        let vlabel = Attr::new("vlabel", &v, &label);
        let weight = Attr::new("weight", &e, &num);
        let schema = SchemaBuilder::new("WeightedGraph")
            .obs([v.clone(), e.clone()])
            .homs([src.clone(), tgt.clone()])
            .attrtypes([label, num])
            .attrs([vlabel.clone(), weight.clone()])
            .build()
            .unwrap();
        Graph {
            v,
            e,
            src,
            tgt,
            vlabel,
            weight,
            schema: Arc::new(schema),
        }
    }

    #[test]
    fn test_empty_acset() {
        let g = graph();
        let acs = ACSet::new("g", g.schema.clone());
        for ob in g.schema.obs() {
            assert_eq!(acs.nparts(ob).unwrap(), 0);
            assert!(acs.parts(ob).unwrap().is_empty());
        }
    }

    #[test]
    fn test_add_parts_is_append_only() {
        let g = graph();
        let mut acs = ACSet::new("g", g.schema.clone());

        assert_eq!(acs.add_parts(&g.v, 3).unwrap(), 0..3);
        assert_eq!(acs.add_part(&g.v).unwrap(), 3);
        assert_eq!(acs.add_parts(&g.v, 2).unwrap(), 4..6);
        assert_eq!(acs.add_parts(&g.v, 0).unwrap(), 6..6);
        assert_eq!(acs.nparts(&g.v).unwrap(), 6);
        assert_eq!(acs.nparts(&g.e).unwrap(), 0);
        assert_eq!(acs.parts(&g.v).unwrap().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_add_parts_overflow_changes_nothing() {
        let g = graph();
        let mut acs = ACSet::new("g", g.schema.clone());
        acs.add_parts(&g.e, 2).unwrap();

        let err = acs.add_parts(&g.e, usize::MAX).unwrap_err();
        assert!(matches!(
            err,
            AcsetError::Validation(ValidationError::TooManyParts { nparts: 2, .. })
        ));
        assert_eq!(acs.nparts(&g.e).unwrap(), 2);
        assert_eq!(acs.add_part(&g.e).unwrap(), 2);
    }

    #[test]
    fn test_unknown_ob() {
        let g = graph();
        let mut acs = ACSet::new("g", g.schema.clone());
        let err = acs.add_parts(&Ob::new("W"), 1).unwrap_err();
        assert!(matches!(err, AcsetError::Schema(SchemaError::UnknownOb(_))));
    }

    #[test]
    fn test_set_and_unset_attr() {
        let g = graph();
        let mut acs = ACSet::new("g", g.schema.clone());
        let v = acs.add_part(&g.v).unwrap();

        acs.set_subpart(v, &g.vlabel, json!("a")).unwrap();
        assert!(acs.has_subpart(v, &g.vlabel).unwrap());
        assert_eq!(acs.subpart(v, &g.vlabel).unwrap(), &json!("a"));

        acs.set_subpart(v, &g.vlabel, None).unwrap();
        assert!(!acs.has_subpart(v, &g.vlabel).unwrap());
        // clearing twice is fine
        acs.set_subpart(v, &g.vlabel, None).unwrap();
    }

    #[test]
    fn test_wrong_kind_leaves_value() {
        let g = graph();
        let mut acs = ACSet::new("g", g.schema.clone());
        let v = acs.add_part(&g.v).unwrap();
        acs.set_subpart(v, &g.vlabel, json!("a")).unwrap();

        let err = acs.set_subpart(v, &g.vlabel, json!(3.5)).unwrap_err();
        assert!(matches!(
            err,
            AcsetError::Validation(ValidationError::WrongKind { .. })
        ));
        assert_eq!(acs.subpart(v, &g.vlabel).unwrap(), &json!("a"));
    }

    #[test]
    fn test_hom_bounds() {
        let g = graph();
        let mut acs = ACSet::new("g", g.schema.clone());
        acs.add_parts(&g.v, 2).unwrap();
        let e = acs.add_part(&g.e).unwrap();

        acs.set_subpart(e, &g.src, json!(1)).unwrap();
        assert_eq!(acs.hom_part(e, &g.src).unwrap(), 1);

        let err = acs.set_subpart(e, &g.tgt, json!(2)).unwrap_err();
        assert!(matches!(
            err,
            AcsetError::Validation(ValidationError::PartOutOfRange { part: 2, nparts: 2, .. })
        ));
        assert!(!acs.has_subpart(e, &g.tgt).unwrap());

        for bad in [json!(-1), json!(0.5), json!("0")] {
            let err = acs.set_subpart(e, &g.tgt, bad).unwrap_err();
            assert!(matches!(
                err,
                AcsetError::Validation(ValidationError::NotAPart { .. })
            ));
        }
    }

    #[test]
    fn test_row_index_checked() {
        let g = graph();
        let mut acs = ACSet::new("g", g.schema.clone());
        acs.add_part(&g.v).unwrap();

        let err = acs.set_subpart(5, &g.vlabel, json!("ghost")).unwrap_err();
        assert!(matches!(
            err,
            AcsetError::Validation(ValidationError::PartOutOfRange { part: 5, nparts: 1, .. })
        ));
        assert!(!acs.has_subpart(5, &g.vlabel).unwrap());
    }

    #[test]
    fn test_missing_value() {
        let g = graph();
        let mut acs = ACSet::new("g", g.schema.clone());
        let v = acs.add_part(&g.v).unwrap();

        let err = acs.subpart(v, &g.vlabel).unwrap_err();
        assert!(err.is_missing());
    }

    #[test]
    fn test_unknown_property() {
        let g = graph();
        let mut acs = ACSet::new("g", g.schema.clone());
        let v = acs.add_part(&g.v).unwrap();
        let stray = Attr::new("nickname", &g.v, &AttrType::new("Label", ValueKind::Text));

        let err = acs.set_subpart(v, &stray, json!("x")).unwrap_err();
        assert!(matches!(err, AcsetError::Schema(SchemaError::UnknownProperty(_))));
    }

    #[test]
    fn test_incident() {
        let g = graph();
        let mut acs = ACSet::new("g", g.schema.clone());
        acs.add_parts(&g.v, 3).unwrap();
        for (s, t) in [(0, 1), (1, 2), (0, 2), (2, 0)] {
            let e = acs.add_part(&g.e).unwrap();
            acs.set_subpart(e, &g.src, json!(s)).unwrap();
            acs.set_subpart(e, &g.tgt, json!(t)).unwrap();
        }
        // an edge with no source yet
        acs.add_part(&g.e).unwrap();

        assert_eq!(acs.incident(&json!(0), &g.src).unwrap(), vec![0, 2]);
        assert_eq!(acs.incident(&json!(2), &g.tgt).unwrap(), vec![1, 2]);
        assert_eq!(acs.incident(&json!(1), &g.tgt).unwrap(), vec![0]);
        assert!(acs.incident(&json!(9), &g.src).unwrap().is_empty());

        acs.set_subpart(0, &g.weight, json!(0.5)).unwrap();
        acs.set_subpart(3, &g.weight, json!(0.5)).unwrap();
        assert_eq!(acs.incident(&json!(0.5), &g.weight).unwrap(), vec![0, 3]);
        assert!(acs.incident(&json!("0.5"), &g.weight).is_err());
    }

    #[test]
    fn test_prop_dict() {
        let g = graph();
        let mut acs = ACSet::new("g", g.schema.clone());
        acs.add_parts(&g.v, 2).unwrap();
        let e = acs.add_part(&g.e).unwrap();
        acs.set_subpart(e, &g.tgt, json!(1)).unwrap();
        acs.set_subpart(e, &g.weight, json!(2.5)).unwrap();

        let row = acs.prop_dict(&g.e, e).unwrap();
        assert_eq!(Value::Object(row), json!({"tgt": 2, "weight": 2.5}));
        assert!(acs.prop_dict(&g.v, 0).unwrap().is_empty());
    }

    #[test]
    fn test_equality_ignores_name() {
        let g = graph();
        let mut a = ACSet::new("a", g.schema.clone());
        let mut b = ACSet::new("b", g.schema.clone());
        assert_eq!(a, b);

        a.add_part(&g.v).unwrap();
        assert_ne!(a, b);
        b.add_part(&g.v).unwrap();
        a.set_subpart(0, &g.vlabel, json!("x")).unwrap();
        assert_ne!(a, b);
        b.set_subpart(0, &g.vlabel, json!("x")).unwrap();
        assert_eq!(a, b);
    }
}
