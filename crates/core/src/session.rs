//! Read-only session context handed to controllers.
//!
//! Controllers never look the signed-in user up from global state; the
//! shell builds a [`SessionContext`] once after login and passes it in.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::codes::Identity;
use crate::error::CoreError;
use crate::types::DbId;

/// The signed-in lab user as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: DbId,
    pub username: String,
    pub real_name: Option<String>,
    pub identity: Identity,
}

/// Cheap-clone, immutable view of the current session.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    user: Option<Arc<CurrentUser>>,
}

impl SessionContext {
    pub fn new(user: CurrentUser) -> Self {
        Self {
            user: Some(Arc::new(user)),
        }
    }

    /// A context with nobody signed in (public pages).
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        self.user.as_deref()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.user().map(|u| u.identity)
    }

    pub fn is_admin(&self) -> bool {
        self.identity() == Some(Identity::Admin)
    }

    pub fn is_teacher(&self) -> bool {
        self.identity() == Some(Identity::Teacher)
    }

    /// Admins may edit anyone; everyone else only themselves.
    pub fn can_edit_user(&self, target: DbId) -> bool {
        match self.user() {
            Some(user) => user.identity == Identity::Admin || user.id == target,
            None => false,
        }
    }

    /// Fail with `Unauthorized` when nobody is signed in.
    pub fn require_user(&self) -> Result<&CurrentUser, CoreError> {
        self.user()
            .ok_or_else(|| CoreError::Unauthorized("No signed-in user".into()))
    }
}
