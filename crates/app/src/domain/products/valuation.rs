//! Batch valuation.

use jiff::Timestamp;

use crate::domain::products::data::NewProduct;

/// The outcome of valuing one batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Valuation {
    /// `Σ price × quality`, rounded to two decimal places
    pub total_value: f64,

    /// Number of products in the batch
    pub product_count: usize,

    /// When the valuation was computed
    pub timestamp: Timestamp,
}

/// Sum of `price × quality` over the batch, rounded to two decimal places.
///
/// Rounding is half away from zero on the binary `f64` sum, so a total that
/// is not exactly representable rounds according to its stored value.
#[must_use]
pub fn total_value(products: &[NewProduct]) -> f64 {
    let total: f64 = products
        .iter()
        .map(|product| product.price * f64::from(product.quality))
        .sum();

    round_cents(total)
}

fn round_cents(value: f64) -> f64 {
    let cents = value * 100.0;

    // Totals this large carry no fractional cents.
    if !cents.is_finite() {
        return value;
    }

    cents.round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: f64, quality: u8) -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            price,
            quality,
        }
    }

    fn assert_cents(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_weighted_sum() {
        let total = total_value(&[product(10.99, 5), product(20.50, 8)]);

        assert_cents(total, 218.95);
    }

    #[test]
    fn test_empty_batch_is_zero() {
        assert_cents(total_value(&[]), 0.0);
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_cents(total_value(&[product(0.125, 1)]), 0.13);
        assert_cents(total_value(&[product(0.375, 1)]), 0.38);
    }

    #[test]
    fn test_rounds_to_two_places() {
        assert_cents(total_value(&[product(0.124, 1)]), 0.12);
        assert_cents(total_value(&[product(1.0 / 3.0, 3)]), 1.0);
        assert_cents(total_value(&[product(0.333, 10)]), 3.33);
    }

    #[test]
    fn test_huge_total_stays_finite() {
        let total = total_value(&[product(1e307, 10)]);

        assert!(total.is_finite(), "expected a finite total, got {total}");
        assert!((total - 1e308).abs() <= 1e308 * 4.0 * f64::EPSILON);
    }

    #[test]
    fn test_free_products_contribute_nothing() {
        let total = total_value(&[product(0.0, 10), product(4.0, 2)]);

        assert_cents(total, 8.0);
    }
}
