//! Catalog browsing logic, independent of HTTP.
//!
//! - `browser` - category → subcategory → item navigation with breadcrumbs
//! - `filter` - case-insensitive search and price sorting
//! - `listing` - the flat item listing with paging

pub mod browser;
pub mod filter;
pub mod listing;

pub use browser::{Breadcrumb, BrowseContent, BrowseQuery, BrowseState, Layout, View};
pub use filter::{Needle, SortOrder};
pub use listing::{Listing, ListingQuery, ListingSort, Page};
