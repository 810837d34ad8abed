//! Caller identity

use serde::{Deserialize, Serialize};

/// Role of an authenticated principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages the asset register
    Admin,
    /// Performs inspections
    #[default]
    Inspector,
    /// Reviews records
    Auditor,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Inspector => write!(f, "inspector"),
            Self::Auditor => write!(f, "auditor"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "inspector" => Ok(Self::Inspector),
            "auditor" => Ok(Self::Auditor),
            _ => Err(format!("Invalid role: {s}. Use: admin, inspector, auditor")),
        }
    }
}

/// A resolved, authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique username
    pub username: String,
    /// Assigned role
    pub role: Role,
}

impl Identity {
    /// Create an identity
    #[must_use]
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }

    /// Whether this caller may manage the asset register
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
