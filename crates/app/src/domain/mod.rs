//! Appraise Domain Concerns

pub mod products;
