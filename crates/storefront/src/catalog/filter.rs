//! Case-insensitive search and price sorting over catalog records.

use crate::data::{Category, Item, Subcategory};

/// Price sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse a query value, falling back to ascending.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Button label, e.g. `Low to High`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Asc => "Low to High",
            Self::Desc => "High to Low",
        }
    }
}

/// A lowercased search needle. Blank input matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Needle(String);

impl Needle {
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any of `fields` contains the needle, ignoring case.
    #[must_use]
    pub fn found_in(&self, fields: &[&str]) -> bool {
        self.is_blank() || fields.iter().any(|f| f.to_lowercase().contains(&self.0))
    }
}

/// Categories whose name contains the needle.
#[must_use]
pub fn categories(categories: Vec<Category>, needle: &Needle) -> Vec<Category> {
    categories
        .into_iter()
        .filter(|c| needle.found_in(&[c.name.as_str()]))
        .collect()
}

/// Subcategories whose name or parent name contains the needle.
#[must_use]
pub fn subcategories(subcategories: Vec<Subcategory>, needle: &Needle) -> Vec<Subcategory> {
    subcategories
        .into_iter()
        .filter(|s| needle.found_in(&[s.name.as_str(), s.parent.as_str()]))
        .collect()
}

/// Items whose name, description, category or subcategory contains the needle.
#[must_use]
pub fn items(items: Vec<Item>, needle: &Needle) -> Vec<Item> {
    items
        .into_iter()
        .filter(|i| {
            needle.found_in(&[
                i.name.as_str(),
                i.description.as_str(),
                i.category.as_str(),
                i.subcategory.as_str(),
            ])
        })
        .collect()
}

/// Stable sort by price.
pub fn sort_by_price(items: &mut [Item], order: SortOrder) {
    match order {
        SortOrder::Asc => items.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOrder::Desc => items.sort_by(|a, b| b.price.cmp(&a.price)),
    }
}
