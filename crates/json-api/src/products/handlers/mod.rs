//! Product Handlers

pub(crate) mod calculate;
pub(crate) mod history;
