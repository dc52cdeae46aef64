//! Request mapping: value resolution and template rendering.
//!
//! Both halves are pure functions over input data. The resolver turns a
//! token name into a string via the visitor profile and the integration's
//! mapping config; the template engine substitutes `{token}` placeholders
//! into body and header templates. Neither performs I/O and neither raises
//! for missing data.

mod render;
mod resolve;

pub use render::render_template;
pub use resolve::{resolve_request_tokens, resolve_token_value};
