//! Customer Domain
//!
//! Owns the customer identity records and the ban flag. Every caller identity
//! registers at most once; after that its record is only ever touched by the
//! owner's ban and unban operations. Records are never deleted.
//!
//! # Registration Model
//!
//! A customer is registered when the registry holds an entry for its identity.
//! The birth year is plain data, so a birth year of 0 is a legal input.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_customer::{CustomerRegistry, CustomerProfile};
//!
//! let mut registry = CustomerRegistry::new();
//! registry.register(caller, profile, now)?;
//! assert!(!registry.is_banned(&caller));
//! ```

pub mod customer;
pub mod registry;
pub mod error;

pub use customer::{Customer, CustomerProfile};
pub use registry::CustomerRegistry;
pub use error::CustomerError;
