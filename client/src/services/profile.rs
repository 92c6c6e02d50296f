//! Presentation helpers for the signed-in profile.

use serde::Serialize;

use crate::auth::{Identity, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleBadge {
    Destructive,
    Default,
    Secondary,
    Outline,
}

pub fn role_badge(role: Role) -> RoleBadge {
    match role {
        Role::Admin => RoleBadge::Destructive,
        Role::Finance => RoleBadge::Default,
        Role::Approver => RoleBadge::Secondary,
        Role::Employee => RoleBadge::Outline,
    }
}

/// First letter of each word, uppercased.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Avatar text for the header; `U` when nobody is signed in.
pub fn avatar_initials(identity: Option<&Identity>) -> String {
    match identity {
        Some(identity) => initials(&identity.name),
        None => "U".to_string(),
    }
}
