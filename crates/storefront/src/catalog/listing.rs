//! Flat item listing with name search, sorting and paging.

use serde::Deserialize;

use super::filter::{Needle, SortOrder};
use crate::data::Item;

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page sizes offered in the listing's size picker.
pub const PAGE_SIZES: [usize; 4] = [10, 20, 30, 50];

/// Raw query parameters for `/items`.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub size: Option<String>,
}

/// Field the listing is sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Price,
    Name,
}

/// Listing sort, written `price-asc`, `name-desc`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListingSort {
    pub field: SortField,
    pub order: SortOrder,
}

impl ListingSort {
    /// Every option of the sort picker with its label.
    pub const OPTIONS: [(Self, &'static str); 4] = [
        (Self::new(SortField::Price, SortOrder::Asc), "Price: Low to High"),
        (Self::new(SortField::Price, SortOrder::Desc), "Price: High to Low"),
        (Self::new(SortField::Name, SortOrder::Asc), "Name: A to Z"),
        (Self::new(SortField::Name, SortOrder::Desc), "Name: Z to A"),
    ];

    #[must_use]
    pub const fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Parse `field-direction`; anything unrecognized is price ascending.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        let Some((field, order)) = value.and_then(|v| v.trim().split_once('-')) else {
            return Self::default();
        };
        let field = match field {
            "name" | "title" => SortField::Name,
            "price" => SortField::Price,
            _ => return Self::default(),
        };
        Self::new(field, SortOrder::parse(Some(order)))
    }

    #[must_use]
    pub fn as_param(self) -> String {
        let field = match self.field {
            SortField::Price => "price",
            SortField::Name => "name",
        };
        format!("{field}-{}", self.order.as_str())
    }

    fn apply(self, items: &mut [Item]) {
        match self.field {
            SortField::Price => super::filter::sort_by_price(items, self.order),
            SortField::Name => {
                items.sort_by_key(|i| i.name.to_lowercase());
                if self.order == SortOrder::Desc {
                    items.reverse();
                }
            }
        }
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub entries: Vec<T>,
    /// 1-based page number.
    pub number: usize,
    pub total_pages: usize,
    pub total_entries: usize,
    pub size: usize,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// Up to five page numbers centred on the current page.
    #[must_use]
    pub fn window(&self) -> Vec<usize> {
        const WIDTH: usize = 5;
        let start = if self.total_pages <= WIDTH || self.number <= 3 {
            1
        } else if self.number + 2 >= self.total_pages {
            self.total_pages + 1 - WIDTH
        } else {
            self.number - 2
        };
        (start..=self.total_pages).take(WIDTH).collect()
    }
}

/// Slice `entries` into page `requested` (1-based) of `size`.
///
/// Out-of-range page numbers clamp to the first or last page. An empty
/// input still yields one (empty) page.
#[must_use]
pub fn paginate<T>(entries: Vec<T>, requested: usize, size: usize) -> Page<T> {
    let size = size.max(1);
    let total_entries = entries.len();
    let total_pages = total_entries.div_ceil(size).max(1);
    let number = requested.clamp(1, total_pages);

    let entries = entries
        .into_iter()
        .skip((number - 1) * size)
        .take(size)
        .collect();

    Page {
        entries,
        number,
        total_pages,
        total_entries,
        size,
    }
}

/// Parsed listing state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub search: String,
    /// Exact category name to restrict to, if any.
    pub category: Option<String>,
    pub sort: ListingSort,
    pub page: usize,
    pub size: usize,
}

impl From<ListingQuery> for Listing {
    fn from(query: ListingQuery) -> Self {
        let size = query
            .size
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|s| PAGE_SIZES.contains(s))
            .unwrap_or(DEFAULT_PAGE_SIZE);
        Self {
            search: query.q.unwrap_or_default().trim().to_string(),
            category: query.category.filter(|c| !c.trim().is_empty()),
            sort: ListingSort::parse(query.sort.as_deref()),
            page: query
                .page
                .and_then(|p| p.trim().parse::<usize>().ok())
                .unwrap_or(1),
            size,
        }
    }
}

impl Listing {
    /// Filter by name and category, sort, then cut out the requested page.
    #[must_use]
    pub fn apply(&self, items: Vec<Item>) -> Page<Item> {
        let needle = Needle::new(&self.search);
        let mut matching: Vec<Item> = items
            .into_iter()
            .filter(|i| needle.found_in(&[i.name.as_str()]))
            .filter(|i| self.category.as_ref().is_none_or(|c| &i.category == c))
            .collect();
        self.sort.apply(&mut matching);
        paginate(matching, self.page, self.size)
    }

    /// URL for page `number` with everything else unchanged.
    #[must_use]
    pub fn page_href(&self, number: usize) -> String {
        let mut params = Vec::new();
        if !self.search.is_empty() {
            params.push(format!("q={}", urlencoding::encode(&self.search)));
        }
        if let Some(category) = &self.category {
            params.push(format!("category={}", urlencoding::encode(category)));
        }
        params.push(format!("sort={}", self.sort.as_param()));
        params.push(format!("size={}", self.size));
        params.push(format!("page={number}"));
        format!("/items?{}", params.join("&"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use furnicraft_core::{ItemId, Price};

    use super::*;

    fn item(id: u32, name: &str, price: i64) -> Item {
        Item {
            id: ItemId::new(id),
            name: name.to_string(),
            price: Price::from_rupees(price),
            description: String::new(),
            photos: Vec::new(),
            category: if id % 2 == 0 { "Chair" } else { "Sofa" }.to_string(),
            subcategory: String::new(),
        }
    }

    fn many(n: u32) -> Vec<Item> {
        (1..=n)
            .map(|i| item(i, &format!("Item {i:02}"), i64::from(i) * 100))
            .collect()
    }

    #[test]
    fn test_paginate_clamps_to_last_page() {
        let page = paginate((1..=23).collect::<Vec<_>>(), 9, 10);
        assert_eq!(page.number, 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.entries, vec![21, 22, 23]);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_paginate_clamps_page_zero() {
        let page = paginate((1..=5).collect::<Vec<_>>(), 0, 10);
        assert_eq!(page.number, 1);
        assert_eq!(page.entries.len(), 5);
    }

    #[test]
    fn test_paginate_empty_has_one_page() {
        let page = paginate(Vec::<u8>::new(), 4, 10);
        assert_eq!(page.number, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.entries.is_empty());
    }

    #[test]
    fn test_page_window() {
        let mut page = paginate((1..=100).collect::<Vec<_>>(), 1, 10);
        assert_eq!(page.window(), [1, 2, 3, 4, 5]);
        page.number = 6;
        assert_eq!(page.window(), [4, 5, 6, 7, 8]);
        page.number = 10;
        assert_eq!(page.window(), [6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_listing_searches_names_only() {
        let listing = Listing::from(ListingQuery {
            q: Some("item 1".to_string()),
            ..ListingQuery::default()
        });
        let page = listing.apply(many(15));
        assert_eq!(page.total_entries, 6);
    }

    #[test]
    fn test_listing_sorts_and_pages() {
        let listing = Listing::from(ListingQuery {
            sort: Some("price-desc".to_string()),
            page: Some("2".to_string()),
            ..ListingQuery::default()
        });
        let page = listing.apply(many(12));
        let ids: Vec<_> = page.entries.iter().map(|i| i.id.get()).collect();
        assert_eq!(ids, [2, 1]);
    }

    #[test]
    fn test_listing_name_sort_and_category() {
        let listing = Listing::from(ListingQuery {
            sort: Some("name-desc".to_string()),
            category: Some("Chair".to_string()),
            ..ListingQuery::default()
        });
        let page = listing.apply(many(6));
        let ids: Vec<_> = page.entries.iter().map(|i| i.id.get()).collect();
        assert_eq!(ids, [6, 4, 2]);
    }

    #[test]
    fn test_unknown_size_falls_back() {
        let listing = Listing::from(ListingQuery {
            size: Some("7".to_string()),
            page: Some("abc".to_string()),
            ..ListingQuery::default()
        });
        assert_eq!(listing.size, DEFAULT_PAGE_SIZE);
        assert_eq!(listing.page, 1);
    }

    #[test]
    fn test_sort_param_round_trip() {
        for (sort, _) in ListingSort::OPTIONS {
            assert_eq!(ListingSort::parse(Some(sort.as_param().as_str())), sort);
        }
    }
}
