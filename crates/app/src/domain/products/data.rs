//! Products Data

/// A validated product entry, not yet stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub quality: u8,
}
