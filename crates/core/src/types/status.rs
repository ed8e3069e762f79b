//! Order status.

use serde::{Deserialize, Serialize};

/// Payment status of a placed order.
///
/// Orders are created as `Pending` and flipped to `Success` by the status
/// endpoint. The wire values are asymmetric (`"Pending"` / `"success"`) for
/// compatibility with existing clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "success")]
    Success,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Success => write!(f, "success"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "success" => Ok(Self::Success),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_values() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"Pending\""
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::Success).unwrap(),
            "\"success\""
        );
    }

    #[test]
    fn test_display_from_str_roundtrip() {
        for status in [OrderStatus::Pending, OrderStatus::Success] {
            let parsed: OrderStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("Delivered".parse::<OrderStatus>().is_err());
    }
}
