use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// The user an import session runs on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: String,
    pub name: String,
}

impl UserRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Per-session context, passed explicitly to whatever needs the current user.
///
/// One value is built for each import session; nothing about the current
/// user lives in process-wide state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub user: UserRef,
    pub project_id: String,
    /// Accounting period the import belongs to (e.g. "2023-12").
    pub period: String,
}

impl SessionContext {
    pub fn new(user: UserRef, project_id: impl Into<String>, period: impl Into<String>) -> Result<Self> {
        let user = UserRef::new(user.id.trim(), user.name.trim());
        let project_id = project_id.into().trim().to_string();
        let period = period.into().trim().to_string();
        if user.id.is_empty() {
            return Err(ModelError::InvalidSessionContext(
                "user id must not be empty".to_string(),
            ));
        }
        if project_id.is_empty() {
            return Err(ModelError::InvalidSessionContext(
                "project id must not be empty".to_string(),
            ));
        }
        if period.is_empty() {
            return Err(ModelError::InvalidSessionContext(
                "period must not be empty".to_string(),
            ));
        }
        Ok(Self {
            user,
            project_id,
            period,
        })
    }
}
