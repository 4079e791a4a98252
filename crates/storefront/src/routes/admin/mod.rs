//! Admin route handlers. Every handler requires the ADMIN role.
//!
//! - `orders` - order management and delivery personnel
//! - `catalog` - category, subcategory and item forms

pub mod catalog;
pub mod orders;
