//! Operator accounts and the closed permission set.

use serde::{Deserialize, Serialize};

/// Back-office capabilities. `is_admin` implies all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Pos,
    Orders,
    CashRegister,
    Kitchen,
    Finance,
    Products,
    Modifiers,
    Categories,
    Delivery,
    Settings,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Pos => "pos",
            Permission::Orders => "orders",
            Permission::CashRegister => "cash_register",
            Permission::Kitchen => "kitchen",
            Permission::Finance => "finance",
            Permission::Products => "products",
            Permission::Modifiers => "modifiers",
            Permission::Categories => "categories",
            Permission::Delivery => "delivery",
            Permission::Settings => "settings",
        }
    }
}

/// Permissions that unlock the admin console (everything except the POS and
/// kitchen screens, which are gated individually).
pub const ADMIN_PERMISSIONS: [Permission; 8] = [
    Permission::Orders,
    Permission::CashRegister,
    Permission::Finance,
    Permission::Products,
    Permission::Modifiers,
    Permission::Categories,
    Permission::Delivery,
    Permission::Settings,
];

/// An operator account. The password is stored and compared in plaintext;
/// existing catalog exports carry them that way, so this stays until an
/// import-time migration exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub password: String,
    pub is_admin: bool,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl User {
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.is_admin || self.permissions.contains(&permission)
    }
}
