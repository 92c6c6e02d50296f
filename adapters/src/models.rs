//! Generic data models for the `adapters` crate.
//!
//! These models define the identity shapes shared by every adapter
//! implementation, so the client session model can talk to any storage or
//! credential backend through a consistent data format.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AdapterError;

/// The closed set of roles a Trackly user can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employee,
    Approver,
    Finance,
    Admin,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Employee, Role::Approver, Role::Finance, Role::Admin];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Approver => "approver",
            Role::Finance => "finance",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employee" => Ok(Role::Employee),
            "approver" => Ok(Role::Approver),
            "finance" => Ok(Role::Finance),
            "admin" => Ok(Role::Admin),
            other => Err(AdapterError::UnknownRole(other.to_string())),
        }
    }
}

/// An authenticated user as seen by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: u64,
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// A directory record. The password stays inside the adapter layer.
#[derive(Debug, Clone)]
pub struct Account {
    pub identity: Identity,
    pub password: String,
}

impl Account {
    pub fn new(
        id: u64,
        email: impl Into<String>,
        name: impl Into<String>,
        role: Role,
        password: impl Into<String>,
    ) -> Self {
        Self {
            identity: Identity {
                id,
                email: email.into(),
                name: name.into(),
                role,
            },
            password: password.into(),
        }
    }
}
