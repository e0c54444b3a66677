//! The Petri net schema family.
//!
//! Every variant shares the four tables species (`S`), transitions (`T`),
//! input arcs (`I`) and output arcs (`O`) with their four morphisms, and adds
//! some combination of names, reaction rates/concentrations and free-form
//! property objects.

use std::fmt;

use crate::schema::{Attr, AttrType, Hom, Ob, Schema, SchemaBuilder, SchemaError, ValueKind};

pub fn species() -> Ob {
    Ob::new("S").with_title("Species")
}

pub fn transition() -> Ob {
    Ob::new("T").with_title("Transition")
}

pub fn input() -> Ob {
    Ob::new("I").with_title("Input")
}

pub fn output() -> Ob {
    Ob::new("O").with_title("Output")
}

pub fn hom_it() -> Hom {
    Hom::new("it", &input(), &transition()).with_title("Input transition morphism")
}

pub fn hom_is() -> Hom {
    Hom::new("is", &input(), &species()).with_title("Input species morphism")
}

pub fn hom_ot() -> Hom {
    Hom::new("ot", &output(), &transition()).with_title("Output transition morphism")
}

pub fn hom_os() -> Hom {
    Hom::new("os", &output(), &species()).with_title("Output species morphism")
}

pub fn name_type() -> AttrType {
    AttrType::new("Name", ValueKind::Text).with_title("Name")
}

pub fn concentration_type() -> AttrType {
    AttrType::new("Concentration", ValueKind::Number).with_title("Concentration")
}

pub fn rate_type() -> AttrType {
    AttrType::new("Rate", ValueKind::Number).with_title("Rate")
}

pub fn prop_type() -> AttrType {
    AttrType::new("Prop", ValueKind::Json).with_title("Property")
}

pub fn attr_sname() -> Attr {
    Attr::new("sname", &species(), &name_type())
        .with_title("Species name")
        .with_description("An attribute representing the name of a species.")
}

pub fn attr_tname() -> Attr {
    Attr::new("tname", &transition(), &name_type())
        .with_title("Transition name")
        .with_description("An attribute representing the name of a transition.")
}

pub fn attr_concentration() -> Attr {
    Attr::new("concentration", &species(), &concentration_type())
        .with_title("Species concentration")
        .with_description("An attribute representing the concentration of a species.")
}

pub fn attr_rate() -> Attr {
    Attr::new("rate", &transition(), &rate_type())
        .with_title("Transition rate")
        .with_description("An attribute representing the rate of a transition.")
}

pub fn attr_sprop() -> Attr {
    Attr::new("sprop", &species(), &prop_type())
        .with_title("Species properties")
        .with_description("An attribute representing the properties of a species.")
}

pub fn attr_tprop() -> Attr {
    Attr::new("tprop", &transition(), &prop_type())
        .with_title("Transition properties")
        .with_description("An attribute representing the properties of a transition.")
}

/// One member of the Petri net schema family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PetriSchema {
    PetriNet,
    LabelledPetriNet,
    ReactionNet,
    LabelledReactionNet,
    PropertyPetriNet,
    PropertyLabelledPetriNet,
    PropertyReactionNet,
    #[default]
    PropertyLabelledReactionNet,
}

impl PetriSchema {
    pub const ALL: [PetriSchema; 8] = [
        PetriSchema::PetriNet,
        PetriSchema::LabelledPetriNet,
        PetriSchema::ReactionNet,
        PetriSchema::LabelledReactionNet,
        PetriSchema::PropertyPetriNet,
        PetriSchema::PropertyLabelledPetriNet,
        PetriSchema::PropertyReactionNet,
        PetriSchema::PropertyLabelledReactionNet,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PetriSchema::PetriNet => "PetriNet",
            PetriSchema::LabelledPetriNet => "LabelledPetriNet",
            PetriSchema::ReactionNet => "ReactionNet",
            PetriSchema::LabelledReactionNet => "LabelledReactionNet",
            PetriSchema::PropertyPetriNet => "PropertyPetriNet",
            PetriSchema::PropertyLabelledPetriNet => "PropertyLabelledPetriNet",
            PetriSchema::PropertyReactionNet => "PropertyReactionNet",
            PetriSchema::PropertyLabelledReactionNet => "PropertyLabelledReactionNet",
        }
    }

    /// Look up a variant by its schema name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    fn labelled(&self) -> bool {
        matches!(
            self,
            PetriSchema::LabelledPetriNet
                | PetriSchema::LabelledReactionNet
                | PetriSchema::PropertyLabelledPetriNet
                | PetriSchema::PropertyLabelledReactionNet
        )
    }

    fn reaction(&self) -> bool {
        matches!(
            self,
            PetriSchema::ReactionNet
                | PetriSchema::LabelledReactionNet
                | PetriSchema::PropertyReactionNet
                | PetriSchema::PropertyLabelledReactionNet
        )
    }

    fn property(&self) -> bool {
        matches!(
            self,
            PetriSchema::PropertyPetriNet
                | PetriSchema::PropertyLabelledPetriNet
                | PetriSchema::PropertyReactionNet
                | PetriSchema::PropertyLabelledReactionNet
        )
    }

    /// Build the schema.
    pub fn build(&self) -> Result<Schema, SchemaError> {
        let mut builder = SchemaBuilder::new(self.name())
            .obs([species(), transition(), input(), output()])
            .homs([hom_it(), hom_is(), hom_ot(), hom_os()]);
        // attribute types and attributes keep the labelled, reaction, property order
        if self.labelled() {
            builder = builder
                .attrtype(name_type())
                .attrs([attr_sname(), attr_tname()]);
        }
        if self.reaction() {
            builder = builder
                .attrtypes([concentration_type(), rate_type()])
                .attrs([attr_concentration(), attr_rate()]);
        }
        if self.property() {
            builder = builder
                .attrtype(prop_type())
                .attrs([attr_sprop(), attr_tprop()]);
        }
        builder.build()
    }
}

impl fmt::Display for PetriSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_variants_build() {
        for variant in PetriSchema::ALL {
            let schema = variant.build().unwrap();
            assert_eq!(schema.name(), variant.name());
            assert_eq!(schema.obs().len(), 4);
            assert_eq!(schema.homs().len(), 4);
            assert_eq!(PetriSchema::from_name(variant.name()), Some(variant));
        }
        assert_eq!(PetriSchema::from_name("MiraNet"), None);
    }

    #[test]
    fn test_full_variant_attrs() {
        let schema = PetriSchema::PropertyLabelledReactionNet.build().unwrap();
        let names: Vec<&str> = schema.attrs().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["sname", "tname", "concentration", "rate", "sprop", "tprop"]
        );
        let types: Vec<&str> = schema.attrtypes().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(types, vec!["Name", "Concentration", "Rate", "Prop"]);
    }

    #[test]
    fn test_every_element_has_a_title() {
        let schema = PetriSchema::default().build().unwrap();
        assert!(schema.obs().iter().all(|o| o.title.is_some()));
        assert!(schema.homs().iter().all(|h| h.title.is_some()));
        assert!(schema.attrtypes().iter().all(|t| t.title.is_some()));
        assert!(schema.attrs().iter().all(|a| a.title.is_some()));
    }

    #[test]
    fn test_plain_petri_net_has_no_attrs() {
        let schema = PetriSchema::PetriNet.build().unwrap();
        assert!(schema.attrtypes().is_empty());
        assert!(schema.attrs().is_empty());
    }
}
