//! Core dealer types for the dealer locator.
//!
//! The ERP encodes empty fields as JSON `false` and relational fields as
//! `[id, "label"]` pairs. Records are kept as the ERP sent them, so the JSON
//! served to the website is a pass-through of what the ERP returned.

pub mod dealer;
pub mod payload;

pub use dealer::DealerRecord;
pub use payload::{CACHE_KEY, DealersPayload};
