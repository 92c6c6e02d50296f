//! Access gating for views and navigation entries.
//!
//! [`guard`] decides what the authenticated layout does for a route given the
//! session state; [`has_any_role`] is the predicate role-gated entries use.

use tracing::debug;

use super::models::{Identity, RoleSet};
use super::routes::Route;
use super::service::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    ShowLoading,
    Redirect(Route),
}

/// Protected routes require an authenticated session and nothing more; role
/// checks happen in the views and menus that consume the identity.
pub fn guard(route: Route, state: &SessionState) -> GuardDecision {
    let decision = match route {
        Route::Root => GuardDecision::Redirect(Route::Dashboard),
        route if !route.is_protected() => GuardDecision::Render,
        _ => match state {
            SessionState::Loading => GuardDecision::ShowLoading,
            SessionState::Unauthenticated => GuardDecision::Redirect(Route::Login),
            SessionState::Authenticated(_) => GuardDecision::Render,
        },
    };
    debug!(route = %route, ?decision, "route guard");
    decision
}

/// True when an identity is present and holds one of `allowed`.
pub fn has_any_role(identity: Option<&Identity>, allowed: RoleSet) -> bool {
    identity.is_some_and(|identity| allowed.contains(identity.role))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Role;

    fn identity(role: Role) -> Identity {
        Identity {
            id: 7,
            email: format!("{role}@trackly.com"),
            name: "Test User".to_string(),
            role,
        }
    }

    #[test]
    fn root_redirects_to_dashboard_in_every_state() {
        for state in [
            SessionState::Unauthenticated,
            SessionState::Loading,
            SessionState::Authenticated(identity(Role::Employee)),
        ] {
            assert_eq!(
                guard(Route::Root, &state),
                GuardDecision::Redirect(Route::Dashboard)
            );
        }
    }

    #[test]
    fn protected_routes_follow_session_state() {
        for route in Route::ALL.into_iter().filter(|r| r.is_protected()) {
            assert_eq!(
                guard(route, &SessionState::Unauthenticated),
                GuardDecision::Redirect(Route::Login)
            );
            assert_eq!(guard(route, &SessionState::Loading), GuardDecision::ShowLoading);
            assert_eq!(
                guard(route, &SessionState::Authenticated(identity(Role::Employee))),
                GuardDecision::Render
            );
        }
    }

    #[test]
    fn public_routes_always_render() {
        for route in [Route::Login, Route::Register, Route::NotFound] {
            assert_eq!(guard(route, &SessionState::Unauthenticated), GuardDecision::Render);
            assert_eq!(guard(route, &SessionState::Loading), GuardDecision::Render);
        }
    }

    #[test]
    fn finance_gate_admits_only_finance() {
        let finance = RoleSet::from(Role::Finance);
        for role in Role::ALL {
            assert_eq!(
                has_any_role(Some(&identity(role)), finance),
                role == Role::Finance
            );
        }
        assert!(!has_any_role(None, finance));
        assert!(!has_any_role(None, RoleSet::all()));
    }

    #[test]
    fn empty_set_admits_nobody() {
        for role in Role::ALL {
            assert!(!has_any_role(Some(&identity(role)), RoleSet::empty()));
        }
    }
}
