// Entity Models
//
// Closed enumerations the rest of the crate matches on.

pub mod category;

pub use category::{Category, PriceRange, UnknownCategory};
