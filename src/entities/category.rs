// 🏷️ Category Entity - Closed set of spending categories
//
// "A category is a VALUE drawn from a fixed catalog"
//
// Every category owns:
// - the merchant/item names a transaction in it can carry
// - the price range its amounts are drawn from
//
// Category-specific logic matches on the enum, so adding a category is a
// compile error everywhere it is not handled.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Groceries,
    Dining,
    Entertainment,
    Shopping,
    Transportation,
    Utilities,
    Healthcare,
}

/// Inclusive price range, in dollars
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, amount: f64) -> bool {
        amount >= self.min && amount <= self.max
    }
}

impl Category {
    /// Catalog order (also the order categories are drawn from)
    pub const ALL: [Category; 7] = [
        Category::Groceries,
        Category::Dining,
        Category::Entertainment,
        Category::Shopping,
        Category::Transportation,
        Category::Utilities,
        Category::Healthcare,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Groceries => "Groceries",
            Category::Dining => "Dining",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Transportation => "Transportation",
            Category::Utilities => "Utilities",
            Category::Healthcare => "Healthcare",
        }
    }

    /// Item names a transaction in this category can carry
    pub fn items(&self) -> &'static [&'static str] {
        match self {
            Category::Groceries => &[
                "Supermarket",
                "Farmer's Market",
                "Butcher Shop",
                "Bakery",
                "Health Food Store",
            ],
            Category::Dining => &[
                "Restaurant",
                "Fast Food",
                "Coffee Shop",
                "Bar",
                "Food Delivery",
            ],
            Category::Entertainment => &[
                "Movie Theater",
                "Concert",
                "Streaming Service",
                "Gaming",
                "Theme Park",
            ],
            Category::Shopping => &[
                "Clothing Store",
                "Electronics",
                "Home Goods",
                "Online Shopping",
                "Department Store",
            ],
            Category::Transportation => &[
                "Gas Station",
                "Public Transit",
                "Ride Share",
                "Parking",
                "Airline",
            ],
            Category::Utilities => &[
                "Electric Bill",
                "Water Bill",
                "Internet",
                "Phone Bill",
                "Streaming Subscription",
            ],
            Category::Healthcare => &[
                "Pharmacy",
                "Doctor Visit",
                "Dental Care",
                "Vision Care",
                "Health Insurance",
            ],
        }
    }

    pub fn price_range(&self) -> PriceRange {
        match self {
            Category::Groceries => PriceRange::new(15.0, 150.0),
            Category::Dining => PriceRange::new(10.0, 100.0),
            Category::Entertainment => PriceRange::new(15.0, 120.0),
            Category::Shopping => PriceRange::new(20.0, 300.0),
            Category::Transportation => PriceRange::new(5.0, 200.0),
            Category::Utilities => PriceRange::new(30.0, 150.0),
            Category::Healthcare => PriceRange::new(15.0, 250.0),
        }
    }

    /// Check whether `item` belongs to this category's item list
    pub fn has_item(&self, item: &str) -> bool {
        self.items().contains(&item)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Returned when a string names no catalog category
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Exact, case-sensitive match against the catalog names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_seven_categories_with_five_items_each() {
        assert_eq!(Category::ALL.len(), 7);
        for category in Category::ALL {
            assert_eq!(category.items().len(), 5, "{}", category);
        }
    }

    #[test]
    fn test_parse_round_trips_catalog_names() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn test_parse_is_exact() {
        assert!("healthcare".parse::<Category>().is_err());
        assert!(" Healthcare".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());

        let err = "Pets".parse::<Category>().unwrap_err();
        assert_eq!(err.to_string(), "unknown category: Pets");
    }

    #[test]
    fn test_price_ranges() {
        assert_eq!(Category::Shopping.price_range(), PriceRange::new(20.0, 300.0));
        assert_eq!(Category::Transportation.price_range(), PriceRange::new(5.0, 200.0));

        let range = Category::Dining.price_range();
        assert!(range.contains(10.0));
        assert!(range.contains(100.0));
        assert!(!range.contains(100.01));
        assert!(!range.contains(9.99));
    }

    #[test]
    fn test_item_membership() {
        assert!(Category::Groceries.has_item("Farmer's Market"));
        assert!(!Category::Groceries.has_item("Pharmacy"));
        assert!(Category::Healthcare.has_item("Pharmacy"));
    }

    #[test]
    fn test_serializes_as_name() {
        let json = serde_json::to_string(&Category::Healthcare).unwrap();
        assert_eq!(json, "\"Healthcare\"");

        let back: Category = serde_json::from_str("\"Utilities\"").unwrap();
        assert_eq!(back, Category::Utilities);
    }
}
