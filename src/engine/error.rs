// ==========================================
// 家具安装派工系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 非法转换可恢复 (拒绝操作即可);
//       不变量违反表示上游绕过了校验, 必须显式上报, 不做静默修复
// ==========================================

use crate::domain::types::{AssemblerStatus, TaskStatus};
use thiserror::Error;

/// 非法状态转换
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "无效的状态转换{}: {from} → {to}。{from} 允许的目标状态: {}",
    assembler_suffix(.assembler_id),
    join_statuses(.allowed)
)]
pub struct InvalidTransitionError {
    pub from: AssemblerStatus,
    pub to: AssemblerStatus,
    /// `from` 状态下允许的目标状态
    pub allowed: Vec<AssemblerStatus>,
    pub assembler_id: Option<String>,
}

/// 状态与当前任务不一致
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolationError {
    #[error("状态为 AVAILABLE 的装配工不应持有任务 (found: {active_task_id})")]
    AvailableWithActiveTask { active_task_id: String },

    #[error("状态为 {status} 的装配工必须持有任务")]
    MissingActiveTask { status: AssemblerStatus },
}

/// 派工/生命周期决策错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignmentError {
    #[error("派工请求未包含任何装配工")]
    EmptyAssignment,

    #[error("派工请求包含重复的装配工: {0}")]
    DuplicateAssembler(String),

    #[error("装配工不存在: {0}")]
    AssemblerNotFound(String),

    #[error("任务不可派工: task_id={task_id}, status={status}")]
    TaskNotAssignable { task_id: String, status: TaskStatus },

    #[error("装配工不可接单: assembler_id={assembler_id}, status={status}")]
    AssemblerUnavailable {
        assembler_id: String,
        status: AssemblerStatus,
    },

    #[error("装配工 {assembler_id} 未分配到任务 {task_id}")]
    NotAssignedToTask {
        assembler_id: String,
        task_id: String,
    },

    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransitionError),

    #[error("装配工 {assembler_id} 状态不一致: {source}")]
    InvariantViolation {
        assembler_id: String,
        #[source]
        source: InvariantViolationError,
    },
}

fn assembler_suffix(assembler_id: &Option<String>) -> String {
    match assembler_id {
        Some(id) => format!(" (装配工: {})", id),
        None => String::new(),
    }
}

fn join_statuses(statuses: &[AssemblerStatus]) -> String {
    statuses
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_message() {
        let err = InvalidTransitionError {
            from: AssemblerStatus::Assigned,
            to: AssemblerStatus::Working,
            allowed: vec![AssemblerStatus::EnRoute, AssemblerStatus::Available],
            assembler_id: Some("a1".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("a1"));
        assert!(msg.contains("ASSIGNED → WORKING"));
        assert!(msg.contains("EN_ROUTE, AVAILABLE"));

        let anonymous = InvalidTransitionError {
            assembler_id: None,
            ..err
        };
        assert!(!anonymous.to_string().contains("装配工:"));
    }

    #[test]
    fn test_invariant_violation_message() {
        let err = InvariantViolationError::MissingActiveTask {
            status: AssemblerStatus::EnRoute,
        };
        assert!(err.to_string().contains("EN_ROUTE"));

        let err = InvariantViolationError::AvailableWithActiveTask {
            active_task_id: "t1".to_string(),
        };
        assert!(err.to_string().contains("t1"));
    }
}
