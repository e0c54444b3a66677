//! Encoded instances validate against the JSON-Schema derived from their schema.

use acsets::codec;
use acsets::interchange::{derive_json_schema, JsonSchemaOptions};
use acsets::petri::{Petri, PetriSchema};
use acsets::{Schema, ValueKind};
use serde_json::{json, Value};

fn validator(schema: &Schema) -> jsonschema::Validator {
    let doc = derive_json_schema(schema, &JsonSchemaOptions::new());
    jsonschema::validator_for(&doc).unwrap()
}

fn sample(kind: ValueKind, i: usize) -> Value {
    match kind {
        ValueKind::Text => json!(format!("part-{}", i)),
        ValueKind::Number => json!(0.25 + i as f64),
        ValueKind::Integer => json!(i),
        ValueKind::Boolean => json!(i % 2 == 0),
        ValueKind::Json => json!({"uuid": format!("id-{}", i), "tags": [i]}),
        ValueKind::Any => json!(["anything", i]),
    }
}

/// SIR net over `variant` with every attribute of the variant set on every part.
fn populated(variant: PetriSchema) -> Petri {
    let mut sir = Petri::new(variant).unwrap();
    sir.add_species(3).unwrap();
    sir.add_transitions(&[(vec![0, 1], vec![1, 1]), (vec![1], vec![2])])
        .unwrap();

    let schema = sir.schema().clone();
    for attr in schema.attrs() {
        let dom = schema.ob_named(&attr.dom).unwrap();
        let kind = schema
            .attrtypes()
            .iter()
            .find(|t| t.name == attr.codom)
            .unwrap()
            .ty;
        for i in sir.parts(dom).unwrap() {
            sir.set_subpart(i, attr, sample(kind, i)).unwrap();
        }
    }
    sir
}

#[test]
fn encoded_petri_nets_validate() {
    for variant in PetriSchema::ALL {
        let sir = populated(variant);
        let doc = codec::encode(&sir).unwrap();
        assert!(
            validator(sir.schema()).is_valid(&doc),
            "{} instance does not validate",
            variant
        );
    }
}

#[test]
fn empty_net_validates() {
    let sir = Petri::new(PetriSchema::PetriNet).unwrap();
    let doc = codec::encode(&sir).unwrap();
    assert_eq!(doc, json!({"S": [], "T": [], "I": [], "O": []}));
    assert!(validator(sir.schema()).is_valid(&doc));
}

#[test]
fn unknown_row_key_is_rejected() {
    let sir = populated(PetriSchema::LabelledPetriNet);
    let mut doc = codec::encode(&sir).unwrap();
    doc["S"][0]["colour"] = json!("red");
    assert!(!validator(sir.schema()).is_valid(&doc));
}

#[test]
fn zero_hom_value_is_rejected() {
    let sir = populated(PetriSchema::PetriNet);
    let mut doc = codec::encode(&sir).unwrap();
    doc["I"][0]["is"] = json!(0);
    assert!(!validator(sir.schema()).is_valid(&doc));
}

#[test]
fn missing_table_is_rejected() {
    let sir = populated(PetriSchema::PetriNet);
    let mut doc = codec::encode(&sir).unwrap();
    doc.as_object_mut().unwrap().remove("O");
    assert!(!validator(sir.schema()).is_valid(&doc));
}

#[test]
fn null_attribute_is_rejected_like_decode() {
    let v = acsets::Ob::new("V");
    let tag = acsets::AttrType::new("Tag", ValueKind::Any);
    let schema = acsets::SchemaBuilder::new("Tagged")
        .ob(v.clone())
        .attrtype(tag.clone())
        .attr(acsets::Attr::new("tag", &v, &tag))
        .build()
        .unwrap();

    let good = json!({"V": [{"tag": {"k": 1}}, {"tag": "x"}, {}]});
    let bad = json!({"V": [{"tag": null}]});
    let validator = validator(&schema);
    assert!(validator.is_valid(&good));
    assert!(!validator.is_valid(&bad));

    assert!(codec::decode("good", schema.clone(), &good).is_ok());
    assert!(codec::decode("bad", schema, &bad).is_err());
}
