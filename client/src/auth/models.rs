//! Data structures for authentication-related entities.
//!
//! This module defines the request and token shapes of the login flow, the
//! role sets used to gate navigation and views, and the capability flags the
//! rest of the client derives from a role.

use serde::{Deserialize, Serialize};

pub use trackly_adapters::{Identity, Role};

/// Storage key of the opaque access token.
pub const TOKEN_KEY: &str = "trackly_token";
/// Storage key of the JSON profile of the identity the token belongs to.
pub const PROFILE_KEY: &str = "currentUser";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub token_type: String,
}

impl AuthTokens {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// A set of roles, stored as one bit per [`Role`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RoleSet(u8);

impl RoleSet {
    pub const fn empty() -> Self {
        RoleSet(0)
    }

    pub fn all() -> Self {
        Self::of(&Role::ALL)
    }

    pub fn of(roles: &[Role]) -> Self {
        roles.iter().copied().collect()
    }

    pub fn insert(&mut self, role: Role) {
        self.0 |= Self::bit(role);
    }

    pub fn contains(self, role: Role) -> bool {
        self.0 & Self::bit(role) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Role> {
        Role::ALL.into_iter().filter(move |role| self.contains(*role))
    }

    fn bit(role: Role) -> u8 {
        match role {
            Role::Employee => 1 << 0,
            Role::Approver => 1 << 1,
            Role::Finance => 1 << 2,
            Role::Admin => 1 << 3,
        }
    }
}

impl From<Role> for RoleSet {
    fn from(role: Role) -> Self {
        RoleSet(Self::bit(role))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut set = RoleSet::empty();
        for role in iter {
            set.insert(role);
        }
        set
    }
}

/// What a role may see across the dashboard and navigation.
///
/// Admins count as approvers; an employee is anyone who is none of approver,
/// finance or admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub is_approver: bool,
    pub is_finance: bool,
    pub is_admin: bool,
}

impl Capabilities {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Employee => Self {
                is_approver: false,
                is_finance: false,
                is_admin: false,
            },
            Role::Approver => Self {
                is_approver: true,
                is_finance: false,
                is_admin: false,
            },
            Role::Finance => Self {
                is_approver: false,
                is_finance: true,
                is_admin: false,
            },
            Role::Admin => Self {
                is_approver: true,
                is_finance: false,
                is_admin: true,
            },
        }
    }

    pub fn for_identity(identity: Option<&Identity>) -> Self {
        identity
            .map(|identity| Self::for_role(identity.role))
            .unwrap_or(Self::for_role(Role::Employee))
    }

    pub fn is_employee(&self) -> bool {
        !self.is_approver && !self.is_finance && !self.is_admin
    }
}
