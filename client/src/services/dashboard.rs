//! The role-aware dashboard.
//!
//! Decides which quick links and panels the dashboard shows for the signed-in
//! identity.

use serde::Serialize;

use crate::auth::{Capabilities, Identity, Route};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickLink {
    pub title: &'static str,
    pub description: &'static str,
    pub route: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardPanel {
    PendingApprovals,
    AdminWidgets,
    FinanceWidgets,
    ApproverWidgets,
    EmployeeWidgets,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub capabilities: Capabilities,
    pub quick_links: Vec<QuickLink>,
    pub panels: Vec<DashboardPanel>,
}

impl DashboardView {
    pub fn for_identity(identity: Option<&Identity>) -> Self {
        let capabilities = Capabilities::for_identity(identity);
        Self {
            capabilities,
            quick_links: quick_links(&capabilities),
            panels: panels(&capabilities),
        }
    }
}

fn link(title: &'static str, description: &'static str, route: Route) -> QuickLink {
    QuickLink {
        title,
        description,
        route: route.path(),
    }
}

pub fn quick_links(caps: &Capabilities) -> Vec<QuickLink> {
    let mut links = vec![
        link("My Expenses", "View and manage your expenses", Route::Expenses),
        link(
            "Upload Expense",
            "Start a new expense submission",
            Route::ExpenseUpload,
        ),
    ];
    if caps.is_approver {
        links.push(link(
            "Approvals",
            "Review and approve team expenses",
            Route::Approvals,
        ));
    }
    if caps.is_finance {
        links.push(link("Finance", "Process payments and exports", Route::Finance));
    }
    if caps.is_admin {
        links.push(link("Admin", "Manage users and system settings", Route::Admin));
    }
    links
}

/// Panels in render order: the approvals preview, then widget groups.
pub fn panels(caps: &Capabilities) -> Vec<DashboardPanel> {
    let mut panels = Vec::new();
    if caps.is_approver {
        panels.push(DashboardPanel::PendingApprovals);
    }
    if caps.is_admin {
        panels.push(DashboardPanel::AdminWidgets);
    }
    if caps.is_finance {
        panels.push(DashboardPanel::FinanceWidgets);
    }
    if caps.is_approver {
        panels.push(DashboardPanel::ApproverWidgets);
    }
    if caps.is_employee() {
        panels.push(DashboardPanel::EmployeeWidgets);
    }
    panels
}
