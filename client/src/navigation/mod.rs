//! Role-conditioned navigation menus.
//!
//! The desktop sidebar and the mobile bottom bar each build their entries
//! from the signed-in identity. The two menus deliberately differ: the mobile
//! bar shows one role-specific entry, and `Help` only appears there for
//! employees.

pub mod mobile;
pub mod sidebar;

use serde::Serialize;

use crate::auth::Route;

pub use mobile::mobile_nav;
pub use sidebar::{sidebar, SectionKind, Sidebar, SidebarEntry, SidebarSection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    #[serde(serialize_with = "serialize_route")]
    pub route: Route,
    pub quick_add: bool,
}

impl NavItem {
    pub const fn link(label: &'static str, route: Route) -> Self {
        Self {
            label,
            route,
            quick_add: false,
        }
    }

    pub fn is_active(&self, current_path: &str) -> bool {
        is_active(current_path, self.route.path())
    }
}

/// A link is active on its own path and on any path beneath it.
pub fn is_active(current_path: &str, link: &str) -> bool {
    current_path == link
        || current_path
            .strip_prefix(link)
            .is_some_and(|rest| rest.starts_with('/'))
}

fn serialize_route<S: serde::Serializer>(route: &Route, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(route.path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_on_exact_and_nested_paths() {
        assert!(is_active("/expenses", "/expenses"));
        assert!(is_active("/expenses/upload", "/expenses"));
        assert!(!is_active("/expenses-archive", "/expenses"));
        assert!(!is_active("/dashboard", "/expenses"));
    }

    #[test]
    fn nav_item_serializes_route_as_path() {
        let item = NavItem::link("Settings", Route::Settings);
        let json = serde_json::to_value(item).unwrap();
        assert_eq!(json["route"], "/settings");
        assert_eq!(json["quick_add"], false);
    }
}
