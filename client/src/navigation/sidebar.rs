//! The desktop sidebar.

use crate::auth::{Capabilities, Identity, Route};
use crate::config::Branding;

use super::NavItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Main,
    Finance,
    Admin,
    Footer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarEntry {
    Link(NavItem),
    SignOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarSection {
    pub kind: SectionKind,
    pub entries: Vec<SidebarEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidebar {
    pub brand: String,
    pub collapsed_brand: char,
    pub sections: Vec<SidebarSection>,
}

impl Sidebar {
    pub fn links(&self) -> impl Iterator<Item = &NavItem> {
        self.sections
            .iter()
            .flat_map(|section| section.entries.iter())
            .filter_map(|entry| match entry {
                SidebarEntry::Link(item) => Some(item),
                SidebarEntry::SignOut => None,
            })
    }
}

/// The sidebar for `identity`; nothing is rendered without one.
pub fn sidebar(identity: Option<&Identity>, branding: &Branding) -> Option<Sidebar> {
    let identity = identity?;
    let caps = Capabilities::for_role(identity.role);

    let mut main = vec![
        SidebarEntry::Link(NavItem::link("Overview", Route::Dashboard)),
        SidebarEntry::Link(NavItem::link("My Expenses", Route::Expenses)),
        SidebarEntry::Link(NavItem::link("Upload Expense", Route::ExpenseUpload)),
    ];
    if caps.is_approver {
        main.push(SidebarEntry::Link(NavItem::link("Approvals", Route::Approvals)));
    }

    let mut sections = vec![SidebarSection {
        kind: SectionKind::Main,
        entries: main,
    }];
    if caps.is_finance {
        sections.push(SidebarSection {
            kind: SectionKind::Finance,
            entries: vec![SidebarEntry::Link(NavItem::link("Finance", Route::Finance))],
        });
    }
    if caps.is_admin {
        sections.push(SidebarSection {
            kind: SectionKind::Admin,
            entries: vec![SidebarEntry::Link(NavItem::link("Admin", Route::Admin))],
        });
    }
    sections.push(SidebarSection {
        kind: SectionKind::Footer,
        entries: vec![
            SidebarEntry::Link(NavItem::link("Settings", Route::Settings)),
            SidebarEntry::SignOut,
        ],
    });

    Some(Sidebar {
        brand: branding.display_name().to_string(),
        collapsed_brand: branding.logo_letter(),
        sections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;

    fn identity(role: Role) -> Identity {
        Identity {
            id: 1,
            email: format!("{role}@saolrx.com"),
            name: "Someone".to_string(),
            role,
        }
    }

    fn routes(role: Role) -> Vec<Route> {
        sidebar(Some(&identity(role)), &Branding::default())
            .unwrap()
            .links()
            .map(|item| item.route)
            .collect()
    }

    #[test]
    fn no_sidebar_without_identity() {
        assert!(sidebar(None, &Branding::default()).is_none());
    }

    #[test]
    fn employee_links() {
        assert_eq!(
            routes(Role::Employee),
            vec![Route::Dashboard, Route::Expenses, Route::ExpenseUpload, Route::Settings]
        );
    }

    #[test]
    fn approver_gets_approvals_in_main_section() {
        assert_eq!(
            routes(Role::Approver),
            vec![
                Route::Dashboard,
                Route::Expenses,
                Route::ExpenseUpload,
                Route::Approvals,
                Route::Settings
            ]
        );
    }

    #[test]
    fn finance_gets_finance_section() {
        let bar = sidebar(Some(&identity(Role::Finance)), &Branding::default()).unwrap();
        let kinds: Vec<_> = bar.sections.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SectionKind::Main, SectionKind::Finance, SectionKind::Footer]
        );
        assert!(!routes(Role::Finance).contains(&Route::Approvals));
    }

    #[test]
    fn admin_gets_approvals_and_admin_but_not_finance() {
        let links = routes(Role::Admin);
        assert!(links.contains(&Route::Approvals));
        assert!(links.contains(&Route::Admin));
        assert!(!links.contains(&Route::Finance));
        assert!(!links.contains(&Route::Help));
    }

    #[test]
    fn footer_ends_with_sign_out_and_brand_follows_branding() {
        let bar = sidebar(
            Some(&identity(Role::Employee)),
            &Branding::new("Trackly", None),
        )
        .unwrap();
        assert_eq!(bar.brand, "Trackly");
        assert_eq!(bar.collapsed_brand, 'T');
        let footer = bar.sections.last().unwrap();
        assert_eq!(footer.kind, SectionKind::Footer);
        assert_eq!(footer.entries.last(), Some(&SidebarEntry::SignOut));
    }
}
