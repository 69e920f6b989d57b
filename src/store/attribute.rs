//! Attribute Conversion Module
//!
//! Maps JSON values to DynamoDB attribute values and back.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Number, Value};

use crate::error::{StoreError, StoreResult};
use crate::store::Item;

// == JSON to Attribute ==
/// Converts a JSON value into a DynamoDB attribute value.
pub fn to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(to_attribute_map(map)),
    }
}

/// Converts a JSON object into a DynamoDB attribute map.
pub fn to_attribute_map(item: &Item) -> HashMap<String, AttributeValue> {
    item.iter()
        .map(|(name, value)| (name.clone(), to_attribute(value)))
        .collect()
}

// == Attribute to JSON ==
/// Converts a DynamoDB attribute value into JSON.
///
/// String and number sets become arrays. Binary attributes are rejected.
pub fn from_attribute(value: &AttributeValue) -> StoreResult<Value> {
    let json = match value {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::N(n) => Value::Number(parse_number(n)?),
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::L(values) => Value::Array(
            values
                .iter()
                .map(from_attribute)
                .collect::<StoreResult<Vec<_>>>()?,
        ),
        AttributeValue::M(map) => Value::Object(from_attribute_map(map)?),
        AttributeValue::Ss(values) => {
            Value::Array(values.iter().cloned().map(Value::String).collect())
        }
        AttributeValue::Ns(values) => Value::Array(
            values
                .iter()
                .map(|n| parse_number(n).map(Value::Number))
                .collect::<StoreResult<Vec<_>>>()?,
        ),
        other => {
            return Err(StoreError::Serialization(format!(
                "Unsupported attribute type: {:?}",
                other
            )))
        }
    };
    Ok(json)
}

/// Converts a DynamoDB attribute map into a JSON object.
pub fn from_attribute_map(map: &HashMap<String, AttributeValue>) -> StoreResult<Item> {
    map.iter()
        .map(|(name, value)| -> StoreResult<(String, Value)> {
            Ok((name.clone(), from_attribute(value)?))
        })
        .collect()
}

fn parse_number(raw: &str) -> StoreResult<Number> {
    raw.parse::<Number>()
        .map_err(|e| StoreError::Serialization(format!("Invalid number '{}': {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::primitives::Blob;
    use serde_json::json;

    #[test]
    fn test_scalars_to_attribute() {
        assert_eq!(to_attribute(&json!(null)), AttributeValue::Null(true));
        assert_eq!(to_attribute(&json!(true)), AttributeValue::Bool(true));
        assert_eq!(to_attribute(&json!(42)), AttributeValue::N("42".to_string()));
        assert_eq!(to_attribute(&json!(9.5)), AttributeValue::N("9.5".to_string()));
        assert_eq!(to_attribute(&json!("x")), AttributeValue::S("x".to_string()));
    }

    #[test]
    fn test_nested_record_to_attribute_map() {
        let record = json!({"shoeId": "s1", "sizes": [41, 42], "brand": {"name": "Acme"}});
        let map = to_attribute_map(record.as_object().unwrap());

        assert_eq!(map.get("shoeId"), Some(&AttributeValue::S("s1".to_string())));
        assert_eq!(
            map.get("sizes"),
            Some(&AttributeValue::L(vec![
                AttributeValue::N("41".to_string()),
                AttributeValue::N("42".to_string()),
            ]))
        );
        match map.get("brand") {
            Some(AttributeValue::M(brand)) => {
                assert_eq!(brand.get("name"), Some(&AttributeValue::S("Acme".to_string())));
            }
            other => panic!("expected map attribute, got {:?}", other),
        }
    }

    #[test]
    fn test_sets_become_arrays() {
        let ss = AttributeValue::Ss(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(from_attribute(&ss).unwrap(), json!(["a", "b"]));

        let ns = AttributeValue::Ns(vec!["1".to_string(), "2.5".to_string()]);
        assert_eq!(from_attribute(&ns).unwrap(), json!([1, 2.5]));
    }

    #[test]
    fn test_binary_is_rejected() {
        let blob = AttributeValue::B(Blob::new(vec![1, 2, 3]));
        assert!(matches!(
            from_attribute(&blob),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let bad = AttributeValue::N("not-a-number".to_string());
        assert!(from_attribute(&bad).is_err());
    }
}
