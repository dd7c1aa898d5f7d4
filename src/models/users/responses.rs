use serde::Serialize;
use ts_rs::TS;

use super::entities::{Role, User};
use crate::models::common::PaginationInfo;

/// 单个用户，附带由标志推导出的角色列表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UserResponse {
    pub user: User,
    pub roles: Vec<Role>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let roles = user.roles();
        Self { user, roles }
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UserListResponse {
    pub items: Vec<User>,
    pub pagination: PaginationInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::sample_user;

    #[test]
    fn test_user_response_lists_roles_and_hides_hash() {
        let mut user = sample_user(true, true);
        user.password_hash = "$argon2id$secret".to_string();
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert_eq!(json["roles"], serde_json::json!(["trainee", "assessor"]));
        assert!(json["user"].get("password_hash").is_none());
    }
}
