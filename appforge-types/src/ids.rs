//! Identifier types used throughout the AppForge core.
//!
//! Resource identifiers are 64-bit integers minted by the persistence
//! layer. On the wire they travel as decimal strings so that JavaScript
//! clients never lose precision past 2^53.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a persisted resource.
///
/// The zero value is the sentinel "unset ID": an entity keeps it until an
/// external collaborator (the API layer) persists it and assigns a real
/// identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(u64);

impl ResourceId {
    /// The sentinel "not yet persisted" identifier.
    pub const NONE: Self = Self(0);

    /// Creates an identifier from a raw 64-bit value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying 64-bit value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns true when this identifier refers to a persisted resource.
    #[must_use]
    pub const fn is_set(self) -> bool {
        self.0 != 0
    }

    /// Parses an identifier from a decimal string.
    ///
    /// The empty string parses to [`ResourceId::NONE`]; anything else must
    /// be a valid base-10 integer.
    pub fn parse(s: &str) -> crate::Result<Self> {
        if s.is_empty() {
            return Ok(Self::NONE);
        }

        Ok(Self(s.parse::<u64>()?))
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ResourceId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<u64> for ResourceId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Serialize for ResourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = ResourceId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal string or unsigned integer")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(ResourceId(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                ResourceId::parse(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}
