//! Password login and the per-view access gate.

use std::rc::Rc;

use crate::models::{Permission, User, ADMIN_PERMISSIONS};

use super::store::DataStore;

/// The navigable surfaces of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Landing,
    Menu,
    Track,
    Pos,
    Admin,
    Kitchen,
}

/// Session gate over the user list. Login matches the password alone; user
/// names are labels, not identifiers.
pub struct AuthGate {
    store: Rc<DataStore>,
}

impl AuthGate {
    pub fn new(store: Rc<DataStore>) -> Self {
        Self { store }
    }

    /// First user whose password matches wins. Returns whether a session
    /// was established.
    pub fn login(&self, password: &str) -> bool {
        let matched = self
            .store
            .users
            .read()
            .iter()
            .find(|u| u.password == password)
            .cloned();
        match matched {
            Some(user) => {
                tracing::info!(user = %user.name, "login");
                self.store.current_user.set(Some(user));
                true
            }
            None => {
                tracing::warn!("login rejected");
                false
            }
        }
    }

    pub fn logout(&self) {
        self.store.current_user.set(None);
    }

    pub fn current_user(&self) -> Option<User> {
        self.store.current_user.get()
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.store
            .current_user
            .read()
            .as_ref()
            .is_some_and(|u| u.has_permission(permission))
    }

    /// Whether the current session (or its absence) may open a view. The
    /// customer-facing views are public; the admin console opens for admins
    /// and for anyone holding at least one back-office permission.
    pub fn can_access(&self, view: View) -> bool {
        match view {
            View::Landing | View::Menu | View::Track => true,
            View::Pos => self.has_permission(Permission::Pos),
            View::Kitchen => self.has_permission(Permission::Kitchen),
            View::Admin => self
                .store
                .current_user
                .read()
                .as_ref()
                .is_some_and(|u| {
                    u.is_admin || ADMIN_PERMISSIONS.iter().any(|p| u.has_permission(*p))
                }),
        }
    }

    /// Gated views the current session may open, in navigation order.
    pub fn permitted_destinations(&self) -> Vec<View> {
        [View::Pos, View::Admin, View::Kitchen]
            .into_iter()
            .filter(|v| self.can_access(*v))
            .collect()
    }
}
