//! Strongly-typed value objects used by catalog entities.
//!
//! These wrappers enforce basic invariants (e.g., positive identifiers) so
//! that once a value reaches the domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let raw = value
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| TypeConstraintError::InvalidValue(value.to_string()))?;
                Self::new(raw)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(ItemId, "Unique identifier for a catalog item.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_rejects_non_positive_values() {
        assert_eq!(ItemId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(ItemId::new(-3), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(ItemId::new(7).map(ItemId::get), Ok(7));
    }

    #[test]
    fn item_id_parses_from_path_segment() {
        assert_eq!(" 12 ".parse::<ItemId>().map(i32::from), Ok(12));
        assert!(matches!(
            "abc".parse::<ItemId>(),
            Err(TypeConstraintError::InvalidValue(_))
        ));
        assert_eq!("0".parse::<ItemId>(), Err(TypeConstraintError::NonPositiveId));
    }
}
