//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `u32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `get()`
/// - `From<u32>`, `Into<u32>` and `FromStr` implementations
///
/// # Example
///
/// ```rust
/// # use furnicraft_core::define_id;
/// define_id!(ShelfId);
/// define_id!(DrawerId);
///
/// let shelf = ShelfId::new(1);
/// let drawer: DrawerId = "7".parse().unwrap();
///
/// assert_eq!(shelf.get(), 1);
/// assert_eq!(drawer.to_string(), "7");
/// // These are different types, so this won't compile:
/// // let _: ShelfId = drawer;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create a new ID from a u32 value.
            #[must_use]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Get the underlying u32 value.
            #[must_use]
            pub const fn get(&self) -> u32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim().parse::<u32>().map(Self)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(CategoryId);
define_id!(SubcategoryId);
define_id!(ItemId);
define_id!(AddressId);
define_id!(DeliveryPersonId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        let id: ItemId = " 12 ".parse().unwrap();
        assert_eq!(id, ItemId::new(12));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("abc".parse::<CategoryId>().is_err());
        assert!("".parse::<CategoryId>().is_err());
        assert!("-1".parse::<CategoryId>().is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let json = serde_json::to_string(&ItemId::new(11)).unwrap();
        assert_eq!(json, "11");
        let back: ItemId = serde_json::from_str("11").unwrap();
        assert_eq!(back, ItemId::new(11));
    }
}
