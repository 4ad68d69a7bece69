//! Foundation types shared by every Strix crate.
//!
//! Defines source positions and ranges plus the closed diagnostic category
//! hierarchy ([`Category`], [`HintTier`]). The configuration surface stays
//! string-based for compatibility; everything past the parsing boundary works
//! with these closed variants.

mod category;
mod range;

pub use category::{Category, HintTier};
pub use range::{Position, Range};
