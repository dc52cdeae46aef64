//! Response extraction: path evaluation and offer normalization.
//!
//! Vendor responses arrive in arbitrary JSON shapes. A per-vendor
//! [`ResponseParserConfig`](crate::models::ResponseParserConfig) locates the
//! offer array and maps each element's fields into a flat
//! [`OfferRecord`](crate::models::OfferRecord). Extraction is total: a
//! malformed shape produces an empty result, never an error.

mod offers;
mod path;

pub use offers::extract_offers;
pub use path::resolve_path;
