//! FurniCraft Core - Shared domain types.
//!
//! This crate provides the types shared by the storefront and its tests:
//! - type-safe IDs for catalog entities, addresses and delivery personnel
//! - validated email addresses
//! - rupee prices with decimal arithmetic and Indian digit grouping
//! - user roles, order statuses and delivery availability
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP, no session access.
//! The storefront's mock data layer and route handlers build on top of it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
