// ==========================================
// 家具安装派工系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型, 把引擎错误转换为调度员可读的拒绝原因
// ==========================================

use crate::domain::types::AssemblerStatus;
use crate::engine::error::{AssignmentError, InvalidTransitionError, InvariantViolationError};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("无效的状态转换: from={from} to={to}, 允许: {allowed:?}")]
    InvalidStateTransition {
        from: AssemblerStatus,
        to: AssemblerStatus,
        allowed: Vec<AssemblerStatus>,
        message: String,
    },

    /// 上游绕过校验或数据损坏, 必须显式上报
    #[error("数据不一致: {0}")]
    InvariantViolation(String),

    #[error("派工被拒绝: {0}")]
    AssignmentRejected(String),
}

impl ApiError {
    /// 错误码 (供前端展示)
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
            ApiError::InvariantViolation(_) => "INVARIANT_VIOLATION",
            ApiError::AssignmentRejected(_) => "ASSIGNMENT_REJECTED",
        }
    }
}

impl From<InvalidTransitionError> for ApiError {
    fn from(err: InvalidTransitionError) -> Self {
        let message = err.to_string();
        ApiError::InvalidStateTransition {
            from: err.from,
            to: err.to,
            allowed: err.allowed,
            message,
        }
    }
}

impl From<InvariantViolationError> for ApiError {
    fn from(err: InvariantViolationError) -> Self {
        ApiError::InvariantViolation(err.to_string())
    }
}

// ==========================================
// 从 AssignmentError 转换
// ==========================================
impl From<AssignmentError> for ApiError {
    fn from(err: AssignmentError) -> Self {
        match err {
            AssignmentError::AssemblerNotFound(id) => {
                ApiError::NotFound(format!("Assembler(id={})不存在", id))
            }
            AssignmentError::InvalidTransition(e) => e.into(),
            e @ AssignmentError::InvariantViolation { .. } => {
                ApiError::InvariantViolation(e.to_string())
            }
            other => ApiError::AssignmentRejected(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
