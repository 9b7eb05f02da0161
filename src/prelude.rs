//! Prelude module for the date_adapter crate.
//!
//! Re-exports the derive_more macros used by the value types.

pub use derive_more::{Display, Into};
