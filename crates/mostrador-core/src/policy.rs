//! # Processor Policies
//!
//! Two behaviours are configurable at startup rather than hard-coded:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StockPolicy (sale decrements stock)                                    │
//! │                                                                         │
//! │    stock 3, sell 5                                                      │
//! │    ├── reject → InsufficientStock, order rolled back   (default)       │
//! │    ├── clamp  → stock 0                                                │
//! │    └── allow  → stock -2                                               │
//! │                                                                         │
//! │  ClosedRegisterPolicy (cash sale with no open register)                 │
//! │                                                                         │
//! │    ├── reject → RegisterClosed, order rolled back      (default)       │
//! │    └── ignore → order recorded, register untouched, warning logged     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// =============================================================================
// Stock Policy
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockPolicy {
    /// Refuse a sale that would take stock below zero.
    #[default]
    Reject,
    /// Let the sale through but floor the stock at zero.
    Clamp,
    /// Let stock go negative.
    Allow,
}

impl StockPolicy {
    pub const ALL: [StockPolicy; 3] = [StockPolicy::Reject, StockPolicy::Clamp, StockPolicy::Allow];

    pub fn as_str(&self) -> &'static str {
        match self {
            StockPolicy::Reject => "reject",
            StockPolicy::Clamp => "clamp",
            StockPolicy::Allow => "allow",
        }
    }

    /// Stock after selling `qty` units from `current`.
    ///
    /// `Err(current)` means the sale is refused. Clamping never raises a
    /// stock that was already negative.
    ///
    /// ```rust
    /// use mostrador_core::StockPolicy;
    ///
    /// assert_eq!(StockPolicy::Reject.apply(50, 3), Ok(47));
    /// assert_eq!(StockPolicy::Reject.apply(3, 5), Err(3));
    /// assert_eq!(StockPolicy::Clamp.apply(3, 5), Ok(0));
    /// assert_eq!(StockPolicy::Allow.apply(3, 5), Ok(-2));
    /// ```
    pub fn apply(&self, current: i64, qty: i64) -> Result<i64, i64> {
        match self {
            StockPolicy::Reject if current < qty => Err(current),
            StockPolicy::Reject | StockPolicy::Allow => Ok(current - qty),
            StockPolicy::Clamp => Ok((current - qty).max(current.min(0))),
        }
    }
}

impl fmt::Display for StockPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StockPolicy::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "policy.stock".to_string(),
                allowed: StockPolicy::ALL.iter().map(|p| p.to_string()).collect(),
            })
    }
}

// =============================================================================
// Closed Register Policy
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClosedRegisterPolicy {
    /// A cash sale needs an open register.
    #[default]
    Reject,
    /// Record the sale anyway and leave the register alone.
    Ignore,
}

impl ClosedRegisterPolicy {
    pub const ALL: [ClosedRegisterPolicy; 2] =
        [ClosedRegisterPolicy::Reject, ClosedRegisterPolicy::Ignore];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClosedRegisterPolicy::Reject => "reject",
            ClosedRegisterPolicy::Ignore => "ignore",
        }
    }
}

impl fmt::Display for ClosedRegisterPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClosedRegisterPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClosedRegisterPolicy::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "policy.closed_register".to_string(),
                allowed: ClosedRegisterPolicy::ALL.iter().map(|p| p.to_string()).collect(),
            })
    }
}
