pub mod answered;
pub mod auth;
pub mod common;
pub mod drills;
pub mod questions;
pub mod trainee_drills;
pub mod users;

pub use common::{ApiResponse, PaginationInfo, PaginationQuery};

/// API 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 1500,

    // 认证相关
    AuthFailed = 2000,
    RegisterFailed = 2001,

    // 用户相关
    UserNotFound = 3000,
    UserAlreadyExists = 3001,
    UserEmailInvalid = 3002,
    UserPasswordInvalid = 3003,
    UserRoleRequired = 3004,
    UserUpdateFailed = 3005,
    UserEmailAlreadyExists = 3006,

    // 训练相关
    DrillNotFound = 4000,
    DrillCreationFailed = 4001,
    DrillInvalid = 4002,

    // 学员训练相关
    TraineeDrillNotFound = 5000,
    TraineeDrillAlreadyAssigned = 5001,
    TraineeNotFound = 5002,

    // 题目相关
    QuestionNotFound = 6000,
    QuestionInvalid = 6001,

    // 作答相关
    AnswerNotFound = 7000,
    AnswerInvalid = 7001,
    AnswerAlreadySubmitted = 7002,
    GradeInvalid = 7003,
}
