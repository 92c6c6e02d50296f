//! The client's route table.
//!
//! Maps URL paths to the views of the application and records which of them
//! sit behind the authenticated layout.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Root,
    Login,
    Register,
    Dashboard,
    Expenses,
    ExpenseUpload,
    Admin,
    Finance,
    Approvals,
    Settings,
    Help,
    NotFound,
}

impl Route {
    pub const ALL: [Route; 12] = [
        Route::Root,
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::Expenses,
        Route::ExpenseUpload,
        Route::Admin,
        Route::Finance,
        Route::Approvals,
        Route::Settings,
        Route::Help,
        Route::NotFound,
    ];

    /// Parses a location. Query string, fragment and a single trailing slash
    /// are ignored; unknown paths map to [`Route::NotFound`].
    pub fn parse(location: &str) -> Route {
        let path = location
            .split(|c: char| c == '?' || c == '#')
            .next()
            .unwrap_or_default();
        let path = match path.strip_suffix('/') {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => path,
        };
        match path {
            "/" | "" => Route::Root,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/dashboard" => Route::Dashboard,
            "/expenses" => Route::Expenses,
            "/expenses/upload" => Route::ExpenseUpload,
            "/admin" => Route::Admin,
            "/finance" => Route::Finance,
            "/approvals" => Route::Approvals,
            "/settings" => Route::Settings,
            "/help" => Route::Help,
            _ => Route::NotFound,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::Expenses => "/expenses",
            Route::ExpenseUpload => "/expenses/upload",
            Route::Admin => "/admin",
            Route::Finance => "/finance",
            Route::Approvals => "/approvals",
            Route::Settings => "/settings",
            Route::Help => "/help",
            Route::NotFound => "*",
        }
    }

    /// Whether the view renders inside the authenticated layout.
    pub fn is_protected(self) -> bool {
        match self {
            Route::Dashboard
            | Route::Expenses
            | Route::ExpenseUpload
            | Route::Admin
            | Route::Finance
            | Route::Approvals
            | Route::Settings
            | Route::Help => true,
            Route::Root | Route::Login | Route::Register | Route::NotFound => false,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
