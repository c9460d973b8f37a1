use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::user::UserError;

/// The closed set of roles in the franchise network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Network administrator; approves and rejects registrations.
    Admin,
    /// Franchise owner.
    Owner,
    /// Vendor partner.
    Vendor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Owner => "owner",
            Role::Vendor => "vendor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "owner" => Ok(Role::Owner),
            "vendor" => Ok(Role::Vendor),
            other => Err(UserError::InvalidRole(other.to_string())),
        }
    }
}
