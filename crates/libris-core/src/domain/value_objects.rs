//! Identifier value objects.
//!
//! # Design
//!
//! Every entity is addressed by a small `Copy` newtype over `u32`. Rules
//! compare entities by id only, never by structural equality, so two loans
//! holding the same `BookItemId` always refer to the same physical copy.
//!
//! # Adding New Identifiers
//!
//! 1. Add one `define_id!` line below
//! 2. Done: `Display`, `From<u32>` and serde come with it

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Identifies a library reader (patron or staff member).
    ReaderId,
    "reader"
);
define_id!(
    /// Identifies a book title, independent of edition or copy.
    BookId,
    "book"
);
define_id!(EditionId, "edition");
define_id!(
    /// Identifies one physical copy.
    BookItemId,
    "item"
);
define_id!(
    /// Identifies a node of the subject taxonomy.
    DomainId,
    "domain"
);
define_id!(LoanId, "loan");
define_id!(LoanItemId, "loan-item");
define_id!(ExtensionId, "extension");
define_id!(AuthorId, "author");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_prefix() {
        assert_eq!(BookId::new(7).to_string(), "book#7");
        assert_eq!(DomainId::from(3).to_string(), "domain#3");
    }

    #[test]
    fn ids_serialize_as_bare_numbers() {
        let json = serde_json::to_string(&ReaderId::new(42)).unwrap();
        assert_eq!(json, "42");

        let back: LoanId = serde_json::from_str("9").unwrap();
        assert_eq!(back.get(), 9);
    }
}
