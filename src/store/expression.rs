//! Update Expression Module
//!
//! Builds placeholder-based DynamoDB update expressions. Attribute names and
//! values never appear in the expression text itself.

use std::collections::HashMap;

use crate::store::AttributePath;

/// Placeholder bound to the new attribute value.
pub const VALUE_PLACEHOLDER: &str = ":value";

// == Update Expression ==
/// A `SET` expression with its attribute name bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateExpression {
    pub expression: String,
    /// `#kN` placeholder to attribute name
    pub names: HashMap<String, String>,
}

impl UpdateExpression {
    /// Builds `SET #k0.#k1... = :value` for the given path.
    pub fn set(path: &AttributePath) -> Self {
        let mut names = HashMap::with_capacity(path.segments().len());
        let mut placeholders = Vec::with_capacity(path.segments().len());

        for (i, segment) in path.segments().iter().enumerate() {
            let placeholder = format!("#k{}", i);
            names.insert(placeholder.clone(), segment.clone());
            placeholders.push(placeholder);
        }

        Self {
            expression: format!("SET {} = {}", placeholders.join("."), VALUE_PLACEHOLDER),
            names,
        }
    }
}
