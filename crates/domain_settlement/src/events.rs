//! Engine events
//!
//! One event per committed call. Rejected calls emit nothing, so the event
//! stream is an audit trail of state that actually changed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Identity, Money, PolicyId};
use domain_policy::Plan;

/// Events emitted by the insurance engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    CustomerRegistered {
        identity: Identity,
        timestamp: DateTime<Utc>,
    },

    PolicyCreated {
        policy_id: PolicyId,
        owner: Identity,
        plate: String,
        plan: Plan,
        timestamp: DateTime<Utc>,
    },

    PremiumPaid {
        policy_id: PolicyId,
        amount: Money,
        timestamp: DateTime<Utc>,
    },

    ClaimSettled {
        policy_id: PolicyId,
        beneficiary: Identity,
        amount: Money,
        timestamp: DateTime<Utc>,
    },

    /// Owner banned the customer behind a delinquent policy
    CustomerBanned {
        identity: Identity,
        policy_id: PolicyId,
        timestamp: DateTime<Utc>,
    },

    CustomerUnbanned {
        identity: Identity,
        timestamp: DateTime<Utc>,
    },

    FundsWithdrawn {
        owner: Identity,
        amount: Money,
        timestamp: DateTime<Utc>,
    },

    /// Unsolicited value arrived
    DepositReceived {
        from: Identity,
        amount: Money,
        timestamp: DateTime<Utc>,
    },
}

impl EngineEvent {
    /// Returns the policy this event concerns, if any
    pub fn policy_id(&self) -> Option<PolicyId> {
        match self {
            EngineEvent::PolicyCreated { policy_id, .. }
            | EngineEvent::PremiumPaid { policy_id, .. }
            | EngineEvent::ClaimSettled { policy_id, .. }
            | EngineEvent::CustomerBanned { policy_id, .. } => Some(*policy_id),
            _ => None,
        }
    }

    /// When the event happened
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            EngineEvent::CustomerRegistered { timestamp, .. }
            | EngineEvent::PolicyCreated { timestamp, .. }
            | EngineEvent::PremiumPaid { timestamp, .. }
            | EngineEvent::ClaimSettled { timestamp, .. }
            | EngineEvent::CustomerBanned { timestamp, .. }
            | EngineEvent::CustomerUnbanned { timestamp, .. }
            | EngineEvent::FundsWithdrawn { timestamp, .. }
            | EngineEvent::DepositReceived { timestamp, .. } => *timestamp,
        }
    }

    /// Short event name for logs
    pub fn name(&self) -> &'static str {
        match self {
            EngineEvent::CustomerRegistered { .. } => "customer_registered",
            EngineEvent::PolicyCreated { .. } => "policy_created",
            EngineEvent::PremiumPaid { .. } => "premium_paid",
            EngineEvent::ClaimSettled { .. } => "claim_settled",
            EngineEvent::CustomerBanned { .. } => "customer_banned",
            EngineEvent::CustomerUnbanned { .. } => "customer_unbanned",
            EngineEvent::FundsWithdrawn { .. } => "funds_withdrawn",
            EngineEvent::DepositReceived { .. } => "deposit_received",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_serializes_with_type_tag() {
        let event = EngineEvent::CustomerUnbanned {
            identity: Identity::new(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "customer_unbanned");
        assert_eq!(event.policy_id(), None);
    }
}
