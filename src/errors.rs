//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_grader_drills_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum GraderDrillsError {
            $($variant(String),)*
        }

        impl GraderDrillsError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(GraderDrillsError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(GraderDrillsError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(GraderDrillsError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl GraderDrillsError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        GraderDrillsError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_grader_drills_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Conflict("E007", "Resource Conflict"),
    Serialization("E008", "Serialization Error"),
    Authentication("E010", "Authentication Error"),
    Authorization("E011", "Authorization Error"),
}

impl GraderDrillsError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for GraderDrillsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for GraderDrillsError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for GraderDrillsError {
    fn from(err: sea_orm::DbErr) -> Self {
        if is_unique_violation(&err) {
            GraderDrillsError::Conflict(err.to_string())
        } else {
            GraderDrillsError::DatabaseOperation(err.to_string())
        }
    }
}

/// 判断是否唯一约束冲突（SQLite / PostgreSQL / MySQL）
pub fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    if let Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
        return true;
    }
    let msg = err.to_string();
    msg.contains("UNIQUE constraint failed")
        || msg.contains("duplicate key value")
        || msg.contains("Duplicate entry")
}

impl From<serde_json::Error> for GraderDrillsError {
    fn from(err: serde_json::Error) -> Self {
        GraderDrillsError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GraderDrillsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(GraderDrillsError::database_config("test").code(), "E001");
        assert_eq!(GraderDrillsError::validation("test").code(), "E005");
        assert_eq!(GraderDrillsError::conflict("test").code(), "E007");
        assert_eq!(GraderDrillsError::authentication("test").code(), "E010");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            GraderDrillsError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            GraderDrillsError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = GraderDrillsError::validation("User must have a role");
        assert_eq!(err.message(), "User must have a role");
    }

    #[test]
    fn test_format_simple() {
        let err = GraderDrillsError::validation("Invalid email");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid email"));
    }

    #[test]
    fn test_unique_violation_maps_to_conflict() {
        let err: GraderDrillsError = sea_orm::DbErr::Custom(
            "UNIQUE constraint failed: TraineeDrills.drillId, TraineeDrills.traineeId".into(),
        )
        .into();
        assert!(matches!(err, GraderDrillsError::Conflict(_)));

        let err: GraderDrillsError = sea_orm::DbErr::Custom("disk I/O error".into()).into();
        assert!(matches!(err, GraderDrillsError::DatabaseOperation(_)));
    }
}
