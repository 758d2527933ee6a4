//! Strongly-typed identifiers for domain entities
//!
//! Caller identities and bookkeeping references are newtype wrappers around
//! UUIDs. Policy ids are different: they come from a single global counter
//! and are plain sequential integers starting at 1.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Strip prefix if present
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

// The unforgeable principal a call executes on behalf of
define_id!(Identity, "IDN");

// Treasury bookkeeping identifiers
define_id!(AccountId, "ACC");
define_id!(JournalEntryId, "JNL");
define_id!(TransferId, "TRF");

/// Sequential policy identifier assigned from the global policy counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyId(u64);

impl PolicyId {
    /// The first id handed out by a fresh counter
    pub const FIRST: PolicyId = PolicyId(1);

    /// Wraps a raw counter value
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw counter value
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Returns the id that follows this one, or None on counter overflow
    pub fn next(&self) -> Option<PolicyId> {
        self.0.checked_add(1).map(PolicyId)
    }
}

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "POL-{}", self.0)
    }
}

impl FromStr for PolicyId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix("POL-").unwrap_or(s);
        Ok(Self(raw.parse()?))
    }
}

impl From<u64> for PolicyId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
