#![allow(clippy::unwrap_used)]

use serde_json::{json, Value};

use super::*;
use crate::models::DEFAULT_SCHEMA;

fn entry(amount: Value, color: &str) -> Value {
    json!({ "amount": amount, "color": color })
}

fn valid_document() -> Value {
    json!({
        "Essentials": {
            "subCategory": {
                "Housing": entry(json!(0), "#374E70"),
                "Utilities": entry(json!(0), "#50688A"),
                "Groceries": entry(json!(42.56), "#6A82A4"),
                "Transport": entry(json!(0), "#839BBD"),
                "Health": entry(json!(0), "#9CB4D6")
            },
            "color": "#1D3557"
        },
        "Luxury": {
            "subCategory": {
                "Food": entry(json!(0), "#8B1C28"),
                "Entertainment": entry(json!(0), "#A83642"),
                "Shopping": entry(json!(0), "#C64F5B")
            },
            "color": "#6A040F"
        },
        "Growth": {
            "subCategory": {
                "Savings": entry(json!(0), "#33594A"),
                "Investment": entry(json!(0), "#4D7563"),
                "Education": entry(json!(0), "#68817C")
            },
            "color": "#1B4332"
        }
    })
}

fn structural(doc: &Value) -> Result<(), ShapeError> {
    check(doc, &DEFAULT_SCHEMA, ValidationMode::Structural)
}

fn strict(doc: &Value) -> Result<(), ShapeError> {
    check(doc, &DEFAULT_SCHEMA, ValidationMode::Strict)
}

// ── Accepted ──────────────────────────────────────────────────

#[test]
fn test_valid_document_accepted() {
    assert!(is_structurally_valid(&valid_document(), &DEFAULT_SCHEMA));
    assert_eq!(strict(&valid_document()), Ok(()));
}

#[test]
fn test_key_order_is_irrelevant() {
    let doc = json!({
        "Growth": valid_document()["Growth"].clone(),
        "Luxury": {
            "color": "#6A040F",
            "subCategory": {
                "Shopping": { "color": "#C64F5B", "amount": 3 },
                "Food": { "color": "#8B1C28", "amount": 1 },
                "Entertainment": { "color": "#A83642", "amount": 2 }
            }
        },
        "Essentials": valid_document()["Essentials"].clone()
    });
    assert!(is_structurally_valid(&doc, &DEFAULT_SCHEMA));
}

#[test]
fn test_arbitrary_amount_values_accepted() {
    let mut doc = valid_document();
    doc["Essentials"]["subCategory"]["Housing"]["amount"] = json!(123456.789);
    doc["Luxury"]["subCategory"]["Food"]["amount"] = json!(-5);
    assert!(is_structurally_valid(&doc, &DEFAULT_SCHEMA));
}

#[test]
fn test_string_amounts_accepted_structurally() {
    let mut doc = valid_document();
    for cat in ["Essentials", "Luxury", "Growth"] {
        let subs = doc[cat]["subCategory"].as_object_mut().unwrap();
        for entry in subs.values_mut() {
            entry["amount"] = json!("12.50");
        }
    }
    assert!(is_structurally_valid(&doc, &DEFAULT_SCHEMA));
    assert!(matches!(strict(&doc), Err(ShapeError::BadAmount { .. })));
}

#[test]
fn test_foreign_colors_accepted() {
    let mut doc = valid_document();
    doc["Growth"]["color"] = json!({ "r": 1 });
    doc["Growth"]["subCategory"]["Savings"]["color"] = json!(7);
    assert!(is_structurally_valid(&doc, &DEFAULT_SCHEMA));
}

#[test]
fn test_scalar_where_object_expected_is_a_leaf() {
    let mut doc = valid_document();
    doc["Luxury"]["subCategory"] = json!("none");
    doc["Growth"] = json!(0);
    doc["Essentials"]["subCategory"]["Housing"] = json!(true);
    assert_eq!(structural(&doc), Ok(()));
    assert_eq!(
        strict(&doc),
        Err(ShapeError::NotAMapping {
            path: "$.Essentials.subCategory.Housing".into()
        })
    );
}

// ── Rejected ──────────────────────────────────────────────────

#[test]
fn test_array_or_null_node_rejected() {
    let mut doc = valid_document();
    doc["Growth"] = json!([]);
    assert_eq!(
        structural(&doc),
        Err(ShapeError::NotAMapping { path: "$.Growth".into() })
    );
    assert!(!is_structurally_valid(&doc, &DEFAULT_SCHEMA));

    let mut doc = valid_document();
    doc["Luxury"]["subCategory"] = json!(["Food", "Shopping", "Entertainment"]);
    assert_eq!(
        structural(&doc),
        Err(ShapeError::NotAMapping { path: "$.Luxury.subCategory".into() })
    );

    let mut doc = valid_document();
    doc["Essentials"]["subCategory"]["Health"] = json!(null);
    assert_eq!(
        strict(&doc),
        Err(ShapeError::NotAMapping { path: "$.Essentials.subCategory.Health".into() })
    );
    assert_eq!(
        structural(&doc),
        Err(ShapeError::NotAMapping { path: "$.Essentials.subCategory.Health".into() })
    );
}

#[test]
fn test_root_must_be_object() {
    for doc in [json!(null), json!([]), json!(42), json!("Essentials")] {
        assert_eq!(structural(&doc), Err(ShapeError::NotAnObject));
    }
}

#[test]
fn test_extra_top_level_key_rejected() {
    let mut doc = valid_document();
    doc["Bonus"] = valid_document()["Growth"].clone();
    assert_eq!(
        structural(&doc),
        Err(ShapeError::KeyMismatch {
            path: "$".into(),
            missing: vec![],
            unexpected: vec!["Bonus".into()],
        })
    );
}

#[test]
fn test_renamed_category_rejected() {
    let mut doc = valid_document();
    let growth = doc.as_object_mut().unwrap().remove("Growth").unwrap();
    doc["Investments"] = growth;
    let err = structural(&doc).unwrap_err();
    assert_eq!(
        err,
        ShapeError::KeyMismatch {
            path: "$".into(),
            missing: vec!["Growth".into()],
            unexpected: vec!["Investments".into()],
        }
    );
}

#[test]
fn test_removed_subcategory_rejected() {
    let mut doc = valid_document();
    doc["Essentials"]["subCategory"]
        .as_object_mut()
        .unwrap()
        .remove("Health");
    let err = structural(&doc).unwrap_err();
    assert_eq!(
        err,
        ShapeError::KeyMismatch {
            path: "$.Essentials.subCategory".into(),
            missing: vec!["Health".into()],
            unexpected: vec![],
        }
    );
}

#[test]
fn test_added_subcategory_rejected() {
    let mut doc = valid_document();
    doc["Luxury"]["subCategory"]["Travel"] = entry(json!(0), "#000000");
    assert!(!is_structurally_valid(&doc, &DEFAULT_SCHEMA));
}

#[test]
fn test_subcategory_moved_between_categories_rejected() {
    let mut doc = valid_document();
    let food = doc["Luxury"]["subCategory"]
        .as_object_mut()
        .unwrap()
        .remove("Food")
        .unwrap();
    doc["Essentials"]["subCategory"]["Food"] = food;
    assert!(!is_structurally_valid(&doc, &DEFAULT_SCHEMA));
}

#[test]
fn test_category_level_keys_checked() {
    let mut doc = valid_document();
    doc["Growth"]["icon"] = json!("leaf");
    let err = structural(&doc).unwrap_err();
    assert!(matches!(err, ShapeError::KeyMismatch { ref path, .. } if path == "$.Growth"));

    let mut doc = valid_document();
    doc["Growth"].as_object_mut().unwrap().remove("color");
    assert!(!is_structurally_valid(&doc, &DEFAULT_SCHEMA));
}

#[test]
fn test_entry_level_keys_checked() {
    let mut doc = valid_document();
    doc["Growth"]["subCategory"]["Savings"]
        .as_object_mut()
        .unwrap()
        .remove("amount");
    let err = structural(&doc).unwrap_err();
    assert_eq!(
        err,
        ShapeError::KeyMismatch {
            path: "$.Growth.subCategory.Savings".into(),
            missing: vec!["amount".into()],
            unexpected: vec![],
        }
    );
}

#[test]
fn test_strict_rejects_negative_amount() {
    let mut doc = valid_document();
    doc["Luxury"]["subCategory"]["Food"]["amount"] = json!(-0.01);
    assert_eq!(
        strict(&doc),
        Err(ShapeError::BadAmount {
            path: "$.Luxury.subCategory.Food.amount".into()
        })
    );
}

#[test]
fn test_shape_error_messages() {
    let err = ShapeError::KeyMismatch {
        path: "$".into(),
        missing: vec!["Growth".into()],
        unexpected: vec!["Bonus".into(), "Extra".into()],
    };
    assert_eq!(
        err.to_string(),
        "$: key mismatch (missing: [Growth], unexpected: [Bonus, Extra])"
    );
    assert_eq!(
        ShapeError::NotAnObject.to_string(),
        "document root is not a JSON object"
    );
}

#[test]
fn test_validation_mode_from_strict() {
    assert_eq!(ValidationMode::from_strict(true), ValidationMode::Strict);
    assert_eq!(ValidationMode::from_strict(false), ValidationMode::Structural);
    assert_eq!(ValidationMode::default(), ValidationMode::Structural);
}
