//! User roles.

use serde::{Deserialize, Serialize};

/// Account role with different permission levels.
///
/// Every account starts as a `Customer`. An `Admin` can promote accounts to
/// `Vendor`; nothing in the system demotes a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular shopper; can manage their own cart and orders.
    #[default]
    Customer,
    /// Promoted account; reserved for future catalog ownership.
    Vendor,
    /// Full access, including promoting other accounts.
    Admin,
}

impl Role {
    /// Whether this role grants admin-only operations.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Vendor => write!(f, "vendor"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "vendor" => Ok(Self::Vendor),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}
