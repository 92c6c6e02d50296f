//! The mobile bottom bar.

use crate::auth::{Identity, Role, Route};

use super::NavItem;

const QUICK_ADD: NavItem = NavItem {
    label: "Add",
    route: Route::ExpenseUpload,
    quick_add: true,
};

/// Home, Expenses, the quick-add button, one role entry, then Settings.
/// Without an identity the bar falls back to the employee layout.
pub fn mobile_nav(identity: Option<&Identity>) -> Vec<NavItem> {
    let role_item = match identity.map(|identity| identity.role) {
        Some(Role::Admin) => NavItem::link("Admin", Route::Admin),
        Some(Role::Finance) => NavItem::link("Finance", Route::Finance),
        Some(Role::Approver) => NavItem::link("Approvals", Route::Approvals),
        Some(Role::Employee) | None => NavItem::link("Help", Route::Help),
    };
    vec![
        NavItem::link("Home", Route::Dashboard),
        NavItem::link("Expenses", Route::Expenses),
        QUICK_ADD,
        role_item,
        NavItem::link("Settings", Route::Settings),
    ]
}
