//! Sidebar navigation tree.
//!
//! The tree itself is static. [`build_navigation`] combines it with the
//! stored sidebar settings, the page the user is on, and live badge counts.

use serde::Serialize;

use storedesk_core::{SidebarPosition, SidebarSettings, Theme};

/// Static navigation entry.
#[derive(Debug, Clone, Copy)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub icon: &'static str,
    pub badge: Option<BadgeKind>,
    pub children: &'static [NavItem],
}

/// Live counter shown next to a navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeKind {
    OpenOrders,
    LowStock,
    UnreadNotifications,
}

/// Current badge values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Badges {
    pub open_orders: usize,
    pub low_stock: usize,
    pub unread_notifications: usize,
}

impl Badges {
    const fn get(self, kind: BadgeKind) -> usize {
        match kind {
            BadgeKind::OpenOrders => self.open_orders,
            BadgeKind::LowStock => self.low_stock,
            BadgeKind::UnreadNotifications => self.unread_notifications,
        }
    }
}

const fn leaf(label: &'static str, path: &'static str, icon: &'static str) -> NavItem {
    NavItem {
        label,
        path,
        icon,
        badge: None,
        children: &[],
    }
}

/// The dashboard's navigation tree, in display order.
pub const NAVIGATION: &[NavItem] = &[
    leaf("Dashboard", "/", "ph-house"),
    NavItem {
        label: "Products",
        path: "/products",
        icon: "ph-package",
        badge: Some(BadgeKind::LowStock),
        children: &[
            leaf("All products", "/products", "ph-list"),
            leaf("Add product", "/products/new", "ph-plus"),
        ],
    },
    NavItem {
        label: "Orders",
        path: "/orders",
        icon: "ph-receipt",
        badge: Some(BadgeKind::OpenOrders),
        children: &[],
    },
    leaf("Analytics", "/analytics", "ph-chart-line"),
    NavItem {
        label: "Notifications",
        path: "/notifications",
        icon: "ph-bell",
        badge: Some(BadgeKind::UnreadNotifications),
        children: &[],
    },
    NavItem {
        label: "Settings",
        path: "/settings",
        icon: "ph-gear",
        badge: None,
        children: &[
            leaf("Payments", "/settings/payments", "ph-credit-card"),
            leaf("Notifications", "/settings/notifications", "ph-bell-ringing"),
            leaf("Security", "/settings/security", "ph-shield-check"),
            leaf("Moderators", "/settings/moderators", "ph-users-three"),
            leaf("Integrations", "/settings/integrations", "ph-plugs"),
            leaf("Sidebar", "/settings/sidebar", "ph-sidebar"),
        ],
    },
];

/// A navigation entry as rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntryView {
    pub label: String,
    pub path: String,
    /// `None` when icons are turned off.
    pub icon: Option<String>,
    pub show_label: bool,
    /// `None` when badges are turned off or the count is zero.
    pub badge: Option<usize>,
    pub active: bool,
    /// Whether the group is open. Only groups holding the active page open.
    pub expanded: bool,
    pub children: Vec<NavEntryView>,
}

/// The full sidebar as rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationView {
    pub position: SidebarPosition,
    pub theme: Theme,
    pub collapsed: bool,
    pub compact: bool,
    pub items: Vec<NavEntryView>,
}

fn matches_path(item_path: &str, active_path: &str) -> bool {
    if item_path == "/" {
        return active_path == "/";
    }
    active_path == item_path
        || active_path
            .strip_prefix(item_path)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Longest entry path matching the active path, so `/products/new` selects
/// "Add product" rather than "All products".
fn best_match(items: &[NavItem], active_path: &str) -> Option<&'static str> {
    items
        .iter()
        .flat_map(|item| std::iter::once(item.path).chain(best_match(item.children, active_path)))
        .filter(|path| matches_path(path, active_path))
        .max_by_key(|path| path.len())
}

fn entry_view(
    item: &NavItem,
    selected: Option<&str>,
    settings: &SidebarSettings,
    badges: Badges,
    claimed: &mut bool,
) -> NavEntryView {
    let children: Vec<_> = item
        .children
        .iter()
        .map(|child| entry_view(child, selected, settings, badges, claimed))
        .collect();
    let child_active = children.iter().any(|c| c.active || c.expanded);

    // Parent and first child can share a path; the child takes the highlight.
    let active = !child_active && !*claimed && selected == Some(item.path);
    if active {
        *claimed = true;
    }

    NavEntryView {
        label: item.label.to_string(),
        path: item.path.to_string(),
        icon: settings.show_icons.then(|| item.icon.to_string()),
        show_label: settings.show_labels && !settings.collapsed,
        badge: item
            .badge
            .filter(|_| settings.show_badges)
            .map(|kind| badges.get(kind))
            .filter(|count| *count > 0),
        active,
        expanded: child_active && !settings.collapsed,
        children,
    }
}

/// Render the navigation tree for the current page.
#[must_use]
pub fn build_navigation(
    settings: &SidebarSettings,
    active_path: &str,
    badges: Badges,
) -> NavigationView {
    let selected = best_match(NAVIGATION, active_path);
    let mut claimed = false;
    let items = NAVIGATION
        .iter()
        .map(|item| entry_view(item, selected, settings, badges, &mut claimed))
        .collect();

    NavigationView {
        position: settings.position,
        theme: settings.theme,
        collapsed: settings.collapsed,
        compact: settings.compact_mode,
        items,
    }
}
