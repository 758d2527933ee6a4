//! Settlement Domain
//!
//! Ties customers, policies and the treasury together into the insurance
//! engine:
//!
//! - [`SettlementEngine`]: monthly premiums and claim payouts
//! - [`AdministrationGuard`]: owner-only bans, unbans and withdrawals
//! - [`InsuranceEngine`]: the facade that owns all state, reads the clock
//!   once per call and records an [`EngineEvent`] for every committed call
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_settlement::{InsuranceEngine, OwnerCapability};
//!
//! let mut engine = InsuranceEngine::new(
//!     OwnerCapability::new(owner),
//!     Currency::ETH,
//!     Arc::new(SystemClock),
//!     SimulatedTransfer::new(Currency::ETH),
//! )?;
//!
//! engine.register(alice, profile)?;
//! let policy = engine.create_insurance(alice, new_policy)?;
//! ```

pub mod admin;
pub mod engine;
pub mod error;
pub mod events;
pub mod settlement;

pub use admin::{AdministrationGuard, OwnerCapability, Withdrawal};
pub use engine::InsuranceEngine;
pub use error::{EngineError, Severity};
pub use events::EngineEvent;
pub use settlement::{ClaimRequest, ClaimSettlement, PremiumPayment, SettlementEngine};
