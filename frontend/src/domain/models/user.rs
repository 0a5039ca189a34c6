use serde::{Deserialize, Serialize};

use crate::domain::birthday::Birthday;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<String>,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub active: bool,
    pub birthday: Option<Birthday>,
}

impl User {
    /// Full name when set, username otherwise
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }
}

/// Access rights of a user on one module (customers, vessels, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub module: String,
    pub can_view: bool,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

/// Operation checked against a [`Permission`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    View,
    Create,
    Edit,
    Delete,
}

impl Permission {
    pub fn allows(&self, access: Access) -> bool {
        match access {
            Access::View => self.can_view,
            Access::Create => self.can_create,
            Access::Edit => self.can_edit,
            Access::Delete => self.can_delete,
        }
    }
}

/// Look up `module` (case-insensitive) in a permission list
pub fn is_allowed(permissions: &[Permission], module: &str, access: Access) -> bool {
    permissions
        .iter()
        .find(|p| p.module.eq_ignore_ascii_case(module))
        .is_some_and(|p| p.allows(access))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_username() {
        let user = User {
            username: "ops".to_string(),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "ops");
    }

    #[test]
    fn test_is_allowed() {
        let permissions = vec![Permission {
            module: "Vessel".to_string(),
            can_view: true,
            can_edit: true,
            ..Default::default()
        }];
        assert!(is_allowed(&permissions, "vessel", Access::View));
        assert!(is_allowed(&permissions, "vessel", Access::Edit));
        assert!(!is_allowed(&permissions, "vessel", Access::Delete));
        assert!(!is_allowed(&permissions, "customer", Access::View));
    }
}
