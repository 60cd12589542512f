//! Caller identity and the organization access check.

use serde::{Deserialize, Serialize};

use crate::{
    db::Database,
    error::{LabelError, Result},
    log_warn,
};

const ENABLE_LOGS: bool = true;

/// Who is making the request. Passed explicitly to every service call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewer {
    pub user_id: Option<i64>,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn user(user_id: i64) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }
}

/// Allow site admins and members of `org_id`; deny everyone else.
pub async fn check_org_access(db: &Database, viewer: Viewer, org_id: i64) -> Result<()> {
    let Some(user_id) = viewer.user_id else {
        log_warn!("Denied anonymous access to org {org_id}");
        return Err(LabelError::PermissionDenied(
            "must be authenticated".to_string(),
        ));
    };

    let Some(user) = db.get_user(user_id).await? else {
        log_warn!("Denied access to org {org_id}: unknown user {user_id}");
        return Err(LabelError::PermissionDenied(format!(
            "user {user_id} does not exist"
        )));
    };

    if user.site_admin || db.is_org_member(org_id, user.id).await? {
        return Ok(());
    }

    log_warn!("Denied user {} access to org {org_id}", user.username);
    Err(LabelError::PermissionDenied(
        "must be a member of the organization".to_string(),
    ))
}
