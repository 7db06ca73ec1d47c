use serde::Serialize;

use crate::auth::role::Role;

const EVERYONE: &[Role] = &Role::ALL;
const STAFF: &[Role] = &[Role::Admin, Role::Instructor];
const ADMIN: &[Role] = &[Role::Admin];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct NavItem {
    pub title: &'static str,
    pub href: &'static str,
    #[serde(skip)]
    pub roles: &'static [Role],
}

impl NavItem {
    pub fn visible_to(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Sidebar entries in display order.
pub static MENU: &[NavItem] = &[
    NavItem { title: "Dashboard", href: "/dashboard", roles: EVERYONE },
    NavItem { title: "Courses", href: "/courses", roles: EVERYONE },
    NavItem { title: "CTF Playground", href: "/ctf", roles: EVERYONE },
    NavItem { title: "Paths & Certificates", href: "/paths", roles: EVERYONE },
    NavItem { title: "Tools", href: "/tools", roles: EVERYONE },
    NavItem { title: "Community", href: "/community", roles: EVERYONE },
    NavItem { title: "Analytics", href: "/analytics", roles: STAFF },
    NavItem { title: "User Management", href: "/users", roles: ADMIN },
    NavItem { title: "System Settings", href: "/settings", roles: ADMIN },
];

pub fn menu_for(role: Role) -> Vec<NavItem> {
    MENU.iter().filter(|item| item.visible_to(role)).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(role: Role) -> Vec<&'static str> {
        menu_for(role).iter().map(|i| i.title).collect()
    }

    #[test]
    fn student_sees_common_items_only() {
        assert_eq!(
            titles(Role::Student),
            [
                "Dashboard",
                "Courses",
                "CTF Playground",
                "Paths & Certificates",
                "Tools",
                "Community"
            ]
        );
    }

    #[test]
    fn instructor_gets_analytics() {
        let menu = titles(Role::Instructor);
        assert_eq!(menu.len(), 7);
        assert_eq!(menu.last(), Some(&"Analytics"));
    }

    #[test]
    fn admin_sees_everything() {
        assert_eq!(menu_for(Role::Admin).len(), MENU.len());
    }
}
