//! Schema definitions and validation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{Attr, AttrType, Hom, Ob, Property, ValueKind};

/// Version of the serialization format carried by every schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionSpec {
    /// Version of the acset schema format.
    #[serde(rename = "ACSetSchema")]
    pub acset_schema: String,
    /// Catlab release the format follows.
    #[serde(rename = "Catlab")]
    pub catlab: String,
}

impl VersionSpec {
    /// Format version written by this crate.
    pub const ACSET_SCHEMA: &'static str = "0.0.1";
    /// Catlab release whose schema format this mirrors.
    pub const CATLAB: &'static str = "0.14.12";

    /// Create a version from its two components.
    pub fn new(acset_schema: impl Into<String>, catlab: impl Into<String>) -> Self {
        Self {
            acset_schema: acset_schema.into(),
            catlab: catlab.into(),
        }
    }
}

impl Default for VersionSpec {
    fn default() -> Self {
        Self::new(Self::ACSET_SCHEMA, Self::CATLAB)
    }
}

/// A schema element found by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element<'a> {
    Ob(&'a Ob),
    Hom(&'a Hom),
    AttrType(&'a AttrType),
    Attr(&'a Attr),
}

/// How a column of the store is checked, resolved once per schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnKind {
    /// Values are part indices into the object at this position.
    Hom { codom: usize },
    /// Values must match this kind.
    Attr { kind: ValueKind },
}

/// Resolved layout of one property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Column {
    pub dom: usize,
    pub kind: ColumnKind,
}

/// An acset schema: objects, morphisms, attribute types and attributes.
///
/// A schema is validated once when built and never changes afterwards.
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    version: VersionSpec,
    obs: Vec<Ob>,
    homs: Vec<Hom>,
    attrtypes: Vec<AttrType>,
    attrs: Vec<Attr>,
    /// Homs followed by attrs, in declaration order.
    properties: Vec<Property>,
    columns: Vec<Column>,
    ob_index: HashMap<Ob, usize>,
    property_index: HashMap<Property, usize>,
}

impl Schema {
    /// Build a schema with the default version.
    pub fn new(
        name: impl Into<String>,
        obs: Vec<Ob>,
        homs: Vec<Hom>,
        attrtypes: Vec<AttrType>,
        attrs: Vec<Attr>,
    ) -> Result<Self, SchemaError> {
        Self::with_version(name, VersionSpec::default(), obs, homs, attrtypes, attrs)
    }

    /// Build a schema carrying an explicit version.
    pub fn with_version(
        name: impl Into<String>,
        version: VersionSpec,
        obs: Vec<Ob>,
        homs: Vec<Hom>,
        attrtypes: Vec<AttrType>,
        attrs: Vec<Attr>,
    ) -> Result<Self, SchemaError> {
        let name = name.into();

        let ob_position = |element: &str, ob: &str| {
            obs.iter()
                .position(|o| o.name == ob)
                .ok_or_else(|| SchemaError::UnresolvedOb {
                    element: element.to_string(),
                    ob: ob.to_string(),
                })
        };

        let mut columns = Vec::with_capacity(homs.len() + attrs.len());
        for hom in &homs {
            let dom = ob_position(&hom.name, &hom.dom)?;
            let codom = ob_position(&hom.name, &hom.codom)?;
            columns.push(Column {
                dom,
                kind: ColumnKind::Hom { codom },
            });
        }
        for attr in &attrs {
            let dom = ob_position(&attr.name, &attr.dom)?;
            let ty = attrtypes
                .iter()
                .find(|t| t.name == attr.codom)
                .ok_or_else(|| SchemaError::UnresolvedAttrType {
                    attr: attr.name.clone(),
                    attrtype: attr.codom.clone(),
                })?;
            columns.push(Column {
                dom,
                kind: ColumnKind::Attr { kind: ty.ty },
            });
        }

        let properties: Vec<Property> = homs
            .iter()
            .map(Property::from)
            .chain(attrs.iter().map(Property::from))
            .collect();

        // First declaration wins for duplicated elements.
        let mut ob_index = HashMap::with_capacity(obs.len());
        for (i, ob) in obs.iter().enumerate() {
            ob_index.entry(ob.clone()).or_insert(i);
        }
        let mut property_index = HashMap::with_capacity(properties.len());
        for (i, prop) in properties.iter().enumerate() {
            property_index.entry(prop.clone()).or_insert(i);
        }

        debug!(
            schema = %name,
            obs = obs.len(),
            homs = homs.len(),
            attrtypes = attrtypes.len(),
            attrs = attrs.len(),
            "built schema"
        );

        Ok(Self {
            name,
            version,
            obs,
            homs,
            attrtypes,
            attrs,
            properties,
            columns,
            ob_index,
            property_index,
        })
    }

    /// Schema name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Format version carried into descriptors.
    pub fn version(&self) -> &VersionSpec {
        &self.version
    }

    /// Objects, in declaration order.
    pub fn obs(&self) -> &[Ob] {
        &self.obs
    }

    /// Morphisms, in declaration order.
    pub fn homs(&self) -> &[Hom] {
        &self.homs
    }

    /// Attribute types, in declaration order.
    pub fn attrtypes(&self) -> &[AttrType] {
        &self.attrtypes
    }

    /// Attributes, in declaration order.
    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    /// All properties: homs first, then attrs, each in declaration order.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// All properties whose domain is `ob`, homs before attrs.
    ///
    /// This order fixes the key order of serialized rows.
    pub fn props_outof(&self, ob: &Ob) -> Vec<&Property> {
        self.properties
            .iter()
            .filter(|p| p.dom() == ob.name)
            .collect()
    }

    /// All morphisms whose domain is `ob`.
    pub fn homs_outof(&self, ob: &Ob) -> Vec<&Hom> {
        self.homs.iter().filter(|h| h.dom == ob.name).collect()
    }

    /// All attributes whose domain is `ob`.
    pub fn attrs_outof(&self, ob: &Ob) -> Vec<&Attr> {
        self.attrs.iter().filter(|a| a.dom == ob.name).collect()
    }

    /// Look up an element by name.
    ///
    /// Names are searched in the order obs, homs, attrtypes, attrs and the
    /// first match wins. Reusing a name across categories is allowed, so a
    /// hom named like an object is only reachable by value, not by name.
    pub fn from_string(&self, name: &str) -> Option<Element<'_>> {
        if let Some(ob) = self.obs.iter().find(|o| o.name == name) {
            return Some(Element::Ob(ob));
        }
        if let Some(hom) = self.homs.iter().find(|h| h.name == name) {
            return Some(Element::Hom(hom));
        }
        if let Some(ty) = self.attrtypes.iter().find(|t| t.name == name) {
            return Some(Element::AttrType(ty));
        }
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(Element::Attr)
    }

    /// Get an object by name.
    pub fn ob_named(&self, name: &str) -> Option<&Ob> {
        self.obs.iter().find(|o| o.name == name)
    }

    /// Get the table position of an object.
    pub fn ob_position(&self, ob: &Ob) -> Result<usize, SchemaError> {
        self.ob_index
            .get(ob)
            .copied()
            .ok_or_else(|| SchemaError::UnknownOb(ob.name.clone()))
    }

    /// Get the column position of a property.
    pub fn property_position(&self, prop: &Property) -> Result<usize, SchemaError> {
        self.property_index
            .get(prop)
            .copied()
            .ok_or_else(|| SchemaError::UnknownProperty(prop.name().to_string()))
    }

    pub(crate) fn column(&self, position: usize) -> Column {
        self.columns[position]
    }

    /// Structural equality of the element lists, ignoring name and version.
    pub fn same_content(&self, other: &Schema) -> bool {
        self.obs == other.obs
            && self.homs == other.homs
            && self.attrtypes == other.attrtypes
            && self.attrs == other.attrs
    }
}

/// Schema-related errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("'{element}' refers to unknown object '{ob}'")]
    UnresolvedOb { element: String, ob: String },

    #[error("attribute '{attr}' refers to unknown attribute type '{attrtype}'")]
    UnresolvedAttrType { attr: String, attrtype: String },

    #[error("object not in schema: {0}")]
    UnknownOb(String),

    #[error("property not in schema: {0}")]
    UnknownProperty(String),
}

/// Builder for creating schemas.
pub struct SchemaBuilder {
    name: String,
    version: VersionSpec,
    obs: Vec<Ob>,
    homs: Vec<Hom>,
    attrtypes: Vec<AttrType>,
    attrs: Vec<Attr>,
}

impl SchemaBuilder {
    /// Start building a new schema.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: VersionSpec::default(),
            obs: Vec::new(),
            homs: Vec::new(),
            attrtypes: Vec::new(),
            attrs: Vec::new(),
        }
    }

    /// Set the version carried by the schema.
    pub fn version(mut self, version: VersionSpec) -> Self {
        self.version = version;
        self
    }

    pub fn ob(mut self, ob: Ob) -> Self {
        self.obs.push(ob);
        self
    }

    pub fn hom(mut self, hom: Hom) -> Self {
        self.homs.push(hom);
        self
    }

    pub fn attrtype(mut self, attrtype: AttrType) -> Self {
        self.attrtypes.push(attrtype);
        self
    }

    pub fn attr(mut self, attr: Attr) -> Self {
        self.attrs.push(attr);
        self
    }

    /// Add several objects at once.
    pub fn obs(mut self, obs: impl IntoIterator<Item = Ob>) -> Self {
        self.obs.extend(obs);
        self
    }

    /// Add several morphisms at once.
    pub fn homs(mut self, homs: impl IntoIterator<Item = Hom>) -> Self {
        self.homs.extend(homs);
        self
    }

    /// Add several attribute types at once.
    pub fn attrtypes(mut self, attrtypes: impl IntoIterator<Item = AttrType>) -> Self {
        self.attrtypes.extend(attrtypes);
        self
    }

    /// Add several attributes at once.
    pub fn attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        self.attrs.extend(attrs);
        self
    }

    /// Build the schema.
    pub fn build(self) -> Result<Schema, SchemaError> {
        Schema::with_version(
            self.name,
            self.version,
            self.obs,
            self.homs,
            self.attrtypes,
            self.attrs,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_schema() -> Schema {
        let v = Ob::new("V");
        let e = Ob::new("E");
        let label = AttrType::new("Label", ValueKind::Text);
        SchemaBuilder::new("Graph")
            .hom(Hom::new("src", &e, &v))
            .hom(Hom::new("tgt", &e, &v))
            .attr(Attr::new("vlabel", &v, &label))
            .attr(Attr::new("elabel", &e, &label))
            .attrtype(label)
            .ob(v)
            .ob(e)
            .build()
            .unwrap()
    }

    #[test]
    fn test_schema_build() {
        let schema = graph_schema();
        assert_eq!(schema.name(), "Graph");
        assert_eq!(schema.obs().len(), 2);
        assert_eq!(schema.properties().len(), 4);
        assert_eq!(schema.version(), &VersionSpec::default());
    }

    #[test]
    fn test_schema_unresolved_dom() {
        let v = Ob::new("V");
        let e = Ob::new("E");
        let result = SchemaBuilder::new("bad")
            .ob(v.clone())
            .hom(Hom::new("src", &e, &v)) // E is not declared
            .build();

        assert!(matches!(
            result,
            Err(SchemaError::UnresolvedOb { ref element, ref ob }) if element == "src" && ob == "E"
        ));
    }

    #[test]
    fn test_schema_unresolved_codom() {
        let v = Ob::new("V");
        let label = AttrType::new("Label", ValueKind::Text);
        let result = SchemaBuilder::new("bad")
            .ob(v.clone())
            .attr(Attr::new("vlabel", &v, &label)) // Label is not declared
            .build();

        assert!(matches!(result, Err(SchemaError::UnresolvedAttrType { .. })));
    }

    #[test]
    fn test_props_outof_order() {
        let schema = graph_schema();
        let e = schema.ob_named("E").unwrap().clone();
        let names: Vec<&str> = schema.props_outof(&e).iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["src", "tgt", "elabel"]);

        assert_eq!(schema.homs_outof(&e).len(), 2);
        assert_eq!(schema.attrs_outof(&e).len(), 1);
        assert!(schema.homs_outof(&Ob::new("V")).is_empty());
    }

    #[test]
    fn test_from_string_precedence() {
        let x = Ob::new("x");
        let y = Ob::new("y");
        let ty = AttrType::new("x", ValueKind::Any);
        let schema = SchemaBuilder::new("collide")
            .ob(x.clone())
            .ob(y.clone())
            .hom(Hom::new("x", &y, &x))
            .hom(Hom::new("f", &y, &x))
            .attr(Attr::new("f", &y, &ty))
            .attrtype(ty)
            .build()
            .unwrap();

        assert!(matches!(schema.from_string("x"), Some(Element::Ob(ob)) if ob.name == "x"));
        assert!(matches!(schema.from_string("f"), Some(Element::Hom(_))));
        assert!(schema.from_string("nope").is_none());
    }

    #[test]
    fn test_positions() {
        let schema = graph_schema();
        assert_eq!(schema.ob_position(&Ob::new("E")).unwrap(), 1);
        assert!(matches!(
            schema.ob_position(&Ob::new("W")),
            Err(SchemaError::UnknownOb(_))
        ));

        let tgt = Property::from(&schema.homs()[1]);
        assert_eq!(schema.property_position(&tgt).unwrap(), 1);
        let elabel = Property::from(&schema.attrs()[1]);
        assert_eq!(schema.property_position(&elabel).unwrap(), 3);
    }

    #[test]
    fn test_same_content_ignores_name() {
        let a = graph_schema();
        let b = Schema::new(
            "Other",
            a.obs().to_vec(),
            a.homs().to_vec(),
            a.attrtypes().to_vec(),
            a.attrs().to_vec(),
        )
        .unwrap();
        assert!(a.same_content(&b));
    }
}
