//! Batch validation.
//!
//! A batch is checked by an ordered list of independent field rules. Every
//! rule runs against every entry, so a single response reports all
//! violations at once.

use serde_json::Value;
use thiserror::Error;

use crate::domain::products::data::NewProduct;

/// Name of the request field holding the batch.
pub const PRODUCTS_FIELD: &str = "products";

/// Reported when the payload holds no `products` array.
pub const PRODUCTS_MESSAGE: &str = "Products must be an array";

/// Reported when a name is missing, not text, or blank after trimming.
pub const NAME_MESSAGE: &str = "Product name is required";

/// Reported when a price is missing, not numeric, or negative.
pub const PRICE_MESSAGE: &str = "Price must be a positive number";

/// Reported when a quality is missing, not an integer, or out of range.
pub const QUALITY_MESSAGE: &str = "Quality must be between 1 and 10";

/// Lowest accepted quality.
pub const MIN_QUALITY: u8 = 1;

/// Highest accepted quality.
pub const MAX_QUALITY: u8 = 10;

/// A single field-level failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Stable identifier such as `products[2].price`
    pub path: String,

    /// The failing field
    pub field: &'static str,

    /// Position of the entry in the batch, absent for batch-level failures
    pub index: Option<usize>,

    /// Human-readable reason
    pub message: &'static str,

    /// The offending value, absent when the field was missing
    pub value: Option<Value>,
}

/// A rejected batch, carrying every violation found.
#[derive(Debug, Error)]
#[error("batch failed validation with {} violation(s)", .violations.len())]
pub struct ValidationError {
    /// Ordered by entry, then by rule
    pub violations: Vec<Violation>,
}

#[derive(Debug, Default)]
struct ProductDraft {
    name: Option<String>,
    price: Option<f64>,
    quality: Option<u8>,
}

impl ProductDraft {
    fn finish(self) -> Option<NewProduct> {
        Some(NewProduct {
            name: self.name?,
            price: self.price?,
            quality: self.quality?,
        })
    }
}

struct FieldRule {
    field: &'static str,
    message: &'static str,

    /// Accepts the field's value into the draft, returning `false` when it is invalid.
    apply: fn(&Value, &mut ProductDraft) -> bool,
}

const ENTRY_RULES: [FieldRule; 3] = [
    FieldRule {
        field: "name",
        message: NAME_MESSAGE,
        apply: apply_name,
    },
    FieldRule {
        field: "price",
        message: PRICE_MESSAGE,
        apply: apply_price,
    },
    FieldRule {
        field: "quality",
        message: QUALITY_MESSAGE,
        apply: apply_quality,
    },
];

/// Validate a raw request payload and extract its product batch.
///
/// # Errors
///
/// Returns every violation found when the payload has no `products` array or
/// when any entry fails a rule.
pub fn validate_batch(payload: &Value) -> Result<Vec<NewProduct>, ValidationError> {
    let Some(entries) = payload.get(PRODUCTS_FIELD).and_then(Value::as_array) else {
        return Err(ValidationError {
            violations: vec![Violation {
                path: PRODUCTS_FIELD.to_string(),
                field: PRODUCTS_FIELD,
                index: None,
                message: PRODUCTS_MESSAGE,
                value: payload.get(PRODUCTS_FIELD).cloned(),
            }],
        });
    };

    let mut violations = Vec::new();
    let mut products = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let mut draft = ProductDraft::default();

        for rule in &ENTRY_RULES {
            let value = entry.get(rule.field);

            if !value.is_some_and(|value| (rule.apply)(value, &mut draft)) {
                violations.push(Violation {
                    path: format!("{PRODUCTS_FIELD}[{index}].{}", rule.field),
                    field: rule.field,
                    index: Some(index),
                    message: rule.message,
                    value: value.cloned(),
                });
            }
        }

        if let Some(product) = draft.finish() {
            products.push(product);
        }
    }

    if violations.is_empty() {
        Ok(products)
    } else {
        Err(ValidationError { violations })
    }
}

fn apply_name(value: &Value, draft: &mut ProductDraft) -> bool {
    draft.name = value
        .as_str()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    draft.name.is_some()
}

fn apply_price(value: &Value, draft: &mut ProductDraft) -> bool {
    draft.price = parse_real(value).filter(|price| *price >= 0.0);

    draft.price.is_some()
}

fn apply_quality(value: &Value, draft: &mut ProductDraft) -> bool {
    draft.quality = parse_integer(value)
        .and_then(|quality| u8::try_from(quality).ok())
        .filter(|quality| (MIN_QUALITY..=MAX_QUALITY).contains(quality));

    draft.quality.is_some()
}

/// Numbers and numeric strings, excluding non-finite values.
fn parse_real(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.parse::<f64>().ok(),
        _ => None,
    }
    .filter(|real| real.is_finite())
}

/// Integers, whole floats (`5.0`), and integer strings.
fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(whole_number)),
        Value::String(text) => text.parse::<i64>().ok(),
        _ => None,
    }
}

#[expect(
    clippy::float_cmp,
    clippy::cast_possible_truncation,
    reason = "exact integrality check before converting a whole, bounded value"
)]
fn whole_number(real: f64) -> Option<i64> {
    const LIMIT: f64 = 9_007_199_254_740_992.0;

    (real.is_finite() && real.trunc() == real && real.abs() < LIMIT).then(|| real as i64)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn violations(payload: &Value) -> Vec<Violation> {
        validate_batch(payload)
            .err()
            .map(|error| error.violations)
            .unwrap_or_default()
    }

    fn paths(payload: &Value) -> Vec<String> {
        violations(payload).into_iter().map(|v| v.path).collect()
    }

    #[test]
    fn test_valid_batch_is_extracted() -> TestResult {
        let products = validate_batch(&json!({
            "products": [
                { "name": "Product 1", "price": 10.99, "quality": 5 },
                { "name": "Product 2", "price": 20.50, "quality": 8 },
            ]
        }))?;

        assert_eq!(
            products,
            vec![
                NewProduct {
                    name: "Product 1".to_string(),
                    price: 10.99,
                    quality: 5,
                },
                NewProduct {
                    name: "Product 2".to_string(),
                    price: 20.5,
                    quality: 8,
                },
            ]
        );

        Ok(())
    }

    #[test]
    fn test_empty_batch_is_valid() -> TestResult {
        let products = validate_batch(&json!({ "products": [] }))?;

        assert!(products.is_empty());

        Ok(())
    }

    #[test]
    fn test_missing_products_is_single_violation() {
        let found = violations(&json!({}));

        assert_eq!(found.len(), 1, "expected one violation, got {found:?}");
        assert_eq!(found[0].path, "products");
        assert_eq!(found[0].message, PRODUCTS_MESSAGE);
        assert_eq!(found[0].index, None);
        assert_eq!(found[0].value, None);
    }

    #[test]
    fn test_non_array_products_is_single_violation() {
        let found = violations(&json!({ "products": { "name": "Widget" } }));

        assert_eq!(found.len(), 1, "expected one violation, got {found:?}");
        assert_eq!(found[0].field, PRODUCTS_FIELD);
        assert_eq!(found[0].value, Some(json!({ "name": "Widget" })));
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        assert_eq!(paths(&Value::Null), vec!["products"]);
        assert_eq!(paths(&json!([1, 2, 3])), vec!["products"]);
    }

    #[test]
    fn test_every_failing_field_is_reported() {
        let found = violations(&json!({
            "products": [{ "name": "", "price": -10, "quality": 11 }]
        }));

        let messages: Vec<&str> = found.iter().map(|v| v.message).collect();

        assert_eq!(messages, vec![NAME_MESSAGE, PRICE_MESSAGE, QUALITY_MESSAGE]);
        assert!(found.iter().all(|v| v.index == Some(0)), "all on entry 0");
    }

    #[test]
    fn test_violations_are_collected_across_entries() {
        let found = paths(&json!({
            "products": [
                { "name": "Fine", "price": 1, "quality": 1 },
                { "name": "   ", "price": 1, "quality": 1 },
                { "name": "Fine", "price": 1, "quality": 0 },
            ]
        }));

        assert_eq!(found, vec!["products[1].name", "products[2].quality"]);
    }

    #[test]
    fn test_missing_fields_are_violations_without_value() {
        let found = violations(&json!({ "products": [{}] }));

        assert_eq!(found.len(), 3, "expected three violations, got {found:?}");
        assert!(found.iter().all(|v| v.value.is_none()), "no values present");
    }

    #[test]
    fn test_non_object_entry_fails_every_rule() {
        assert_eq!(
            paths(&json!({ "products": ["Widget"] })),
            vec!["products[0].name", "products[0].price", "products[0].quality"]
        );
    }

    #[test]
    fn test_name_is_trimmed() -> TestResult {
        let products = validate_batch(&json!({
            "products": [{ "name": "  Widget \t", "price": 1, "quality": 1 }]
        }))?;

        assert_eq!(products[0].name, "Widget");

        Ok(())
    }

    #[test]
    fn test_name_must_be_text() {
        assert_eq!(
            paths(&json!({ "products": [{ "name": 42, "price": 1, "quality": 1 }] })),
            vec!["products[0].name"]
        );
    }

    #[test]
    fn test_price_accepts_zero_and_numeric_strings() -> TestResult {
        let products = validate_batch(&json!({
            "products": [
                { "name": "Free", "price": 0, "quality": 1 },
                { "name": "Text", "price": "4.25", "quality": 1 },
            ]
        }))?;

        assert!(products[0].price.abs() < f64::EPSILON);
        assert!((products[1].price - 4.25).abs() < f64::EPSILON);

        Ok(())
    }

    #[test]
    fn test_price_rejects_non_numeric_values() {
        for price in [json!("cheap"), json!(null), json!(true), json!("inf"), json!(-0.01)] {
            let found = paths(&json!({
                "products": [{ "name": "Widget", "price": price, "quality": 1 }]
            }));

            assert_eq!(found, vec!["products[0].price"], "price {price} should fail");
        }
    }

    #[test]
    fn test_quality_bounds_are_inclusive() -> TestResult {
        let products = validate_batch(&json!({
            "products": [
                { "name": "Low", "price": 1, "quality": 1 },
                { "name": "High", "price": 1, "quality": 10 },
            ]
        }))?;

        assert_eq!(products[0].quality, MIN_QUALITY);
        assert_eq!(products[1].quality, MAX_QUALITY);

        Ok(())
    }

    #[test]
    fn test_quality_accepts_whole_floats_and_integer_strings() -> TestResult {
        let products = validate_batch(&json!({
            "products": [
                { "name": "Float", "price": 1, "quality": 5.0 },
                { "name": "Text", "price": 1, "quality": "7" },
            ]
        }))?;

        assert_eq!(products[0].quality, 5);
        assert_eq!(products[1].quality, 7);

        Ok(())
    }

    #[test]
    fn test_quality_rejects_fractions_and_out_of_range() {
        for quality in [json!(5.5), json!(0), json!(11), json!(-3), json!("ten"), json!(300)] {
            let found = paths(&json!({
                "products": [{ "name": "Widget", "price": 1, "quality": quality }]
            }));

            assert_eq!(
                found,
                vec!["products[0].quality"],
                "quality {quality} should fail"
            );
        }
    }
}
