//! Status and role enums.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Wire values are the backend's Spanish constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "PENDIENTE")]
    Pending,
    #[serde(rename = "CONFIRMADO")]
    Confirmed,
    #[serde(rename = "TERMINADO")]
    Completed,
    #[serde(rename = "CANCELADO")]
    Cancelled,
}

impl OrderStatus {
    /// Whether the order can no longer change status.
    ///
    /// `Completed` and `Cancelled` are final; transitions out of them are
    /// rejected before any backend call is made.
    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// The backend wire constant for this status.
    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Pending => "PENDIENTE",
            Self::Confirmed => "CONFIRMADO",
            Self::Completed => "TERMINADO",
            Self::Cancelled => "CANCELADO",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_wire())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDIENTE" => Ok(Self::Pending),
            "CONFIRMADO" => Ok(Self::Confirmed),
            "TERMINADO" => Ok(Self::Completed),
            "CANCELADO" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// User role as reported by the backend's login endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "CLIENTE")]
    Client,
}

impl UserRole {
    /// Whether this role grants access to the admin panel.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_roundtrip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            let json = serde_json::to_string(&status).expect("serialize");
            assert_eq!(json, format!("\"{}\"", status.as_wire()));

            let parsed: OrderStatus = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_final_states() {
        assert!(!OrderStatus::Pending.is_final());
        assert!(!OrderStatus::Confirmed.is_final());
        assert!(OrderStatus::Completed.is_final());
        assert!(OrderStatus::Cancelled.is_final());
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("ENVIADO".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_role_wire_values() {
        let admin: UserRole = serde_json::from_str("\"ADMIN\"").expect("deserialize");
        assert!(admin.is_admin());

        let client: UserRole = serde_json::from_str("\"CLIENTE\"").expect("deserialize");
        assert!(!client.is_admin());
    }
}
