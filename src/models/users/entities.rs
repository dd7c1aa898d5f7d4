use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{GraderDrillsError, Result};

// 用户角色，与 isTrainee / isAssessor 标志一一对应
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "user.ts")]
pub enum Role {
    Trainee,  // 学员
    Assessor, // 评估员
}

impl Role {
    pub const TRAINEE: &'static str = "trainee";
    pub const ASSESSOR: &'static str = "assessor";

    /// 页面上显示的名称
    pub fn label(&self) -> &'static str {
        match self {
            Role::Trainee => "Trainee",
            Role::Assessor => "Assessor",
        }
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Role>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: trainee, assessor"
            ))
        })
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Trainee => write!(f, "{}", Role::TRAINEE),
            Role::Assessor => write!(f, "{}", Role::ASSESSOR),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            Role::TRAINEE => Ok(Role::Trainee),
            Role::ASSESSOR => Ok(Role::Assessor),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

/// 校验角色标志：用户至少拥有一个角色
pub fn validate_role_flags(is_trainee: bool, is_assessor: bool) -> Result<()> {
    if !is_trainee && !is_assessor {
        return Err(GraderDrillsError::validation("User must have a role"));
    }
    Ok(())
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub name: Option<String>,
    pub is_trainee: bool,
    pub is_assessor: bool,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    /// 用户拥有的角色（顺序固定：trainee, assessor）
    pub fn roles(&self) -> Vec<Role> {
        let mut roles = Vec::with_capacity(2);
        if self.is_trainee {
            roles.push(Role::Trainee);
        }
        if self.is_assessor {
            roles.push(Role::Assessor);
        }
        roles
    }

    pub fn has_role(&self, role: Role) -> bool {
        match role {
            Role::Trainee => self.is_trainee,
            Role::Assessor => self.is_assessor,
        }
    }

    /// 显示名称，未设置时使用邮箱
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }

    fn roles_claim(&self) -> String {
        self.roles()
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    // 生成访问令牌
    pub fn generate_access_token(&self) -> std::result::Result<String, jsonwebtoken::errors::Error> {
        crate::utils::jwt::JwtUtils::generate_access_token(self.id, &self.roles_claim())
    }

    // 生成令牌对
    pub fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::Duration>,
    ) -> std::result::Result<crate::utils::jwt::TokenPair, jsonwebtoken::errors::Error> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            &self.roles_claim(),
            refresh_token_expiry,
        )
    }
}

#[cfg(test)]
pub(crate) fn sample_user(is_trainee: bool, is_assessor: bool) -> User {
    let now = chrono::Utc::now();
    User {
        id: 7,
        email: "trainee@example.com".to_string(),
        password_hash: String::new(),
        name: Some("Sam".to_string()),
        is_trainee,
        is_assessor,
        last_login: None,
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_without_role_fails_validation() {
        let err = validate_role_flags(false, false).unwrap_err();
        assert_eq!(err.message(), "User must have a role");
        assert!(validate_role_flags(true, false).is_ok());
        assert!(validate_role_flags(false, true).is_ok());
    }

    #[test]
    fn test_roles_follow_flags() {
        assert_eq!(sample_user(true, false).roles(), vec![Role::Trainee]);
        assert_eq!(sample_user(false, true).roles(), vec![Role::Assessor]);
        assert_eq!(
            sample_user(true, true).roles(),
            vec![Role::Trainee, Role::Assessor]
        );
        assert!(sample_user(true, true).has_role(Role::Assessor));
        assert!(!sample_user(true, false).has_role(Role::Assessor));
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("trainee".parse::<Role>(), Ok(Role::Trainee));
        assert_eq!("assessor".parse::<Role>(), Ok(Role::Assessor));
        assert!("admin".parse::<Role>().is_err());
        let role: Role = serde_json::from_str("\"assessor\"").unwrap();
        assert_eq!(role, Role::Assessor);
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let mut user = sample_user(true, false);
        assert_eq!(user.display_name(), "Sam");
        user.name = None;
        assert_eq!(user.display_name(), "trainee@example.com");
    }
}
