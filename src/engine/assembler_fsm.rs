// ==========================================
// 家具安装派工系统 - 装配工状态机
// ==========================================
// 状态流: AVAILABLE → ASSIGNED → EN_ROUTE → WORKING → AVAILABLE
// 触发器:
// - AssignTask:   AVAILABLE → ASSIGNED
// - StartTravel:  ASSIGNED → EN_ROUTE
// - ArriveAtSite: EN_ROUTE → WORKING
// - CompleteTask: WORKING → AVAILABLE
// - CancelTask:   ASSIGNED/EN_ROUTE → AVAILABLE
// - AbortTask:    WORKING → AVAILABLE
// ==========================================
// 红线: 无状态、无副作用, 只判定合法性, 不修改实体
// ==========================================

use crate::domain::assembler::Assembler;
use crate::domain::types::AssemblerStatus;
use crate::engine::error::{InvalidTransitionError, InvariantViolationError};
use serde::{Deserialize, Serialize};
use std::fmt;

use AssemblerStatus::{Assigned, Available, EnRoute, Working};

// ==========================================
// 触发器
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssemblerTrigger {
    AssignTask,
    StartTravel,
    ArriveAtSite,
    CompleteTask,
    CancelTask,
    AbortTask,
}

impl AssemblerTrigger {
    /// 触发后的目标状态
    pub fn target(self) -> AssemblerStatus {
        match self {
            AssemblerTrigger::AssignTask => Assigned,
            AssemblerTrigger::StartTravel => EnRoute,
            AssemblerTrigger::ArriveAtSite => Working,
            AssemblerTrigger::CompleteTask
            | AssemblerTrigger::CancelTask
            | AssemblerTrigger::AbortTask => Available,
        }
    }

    /// 触发器适用的来源状态
    pub fn sources(self) -> &'static [AssemblerStatus] {
        match self {
            AssemblerTrigger::AssignTask => &[Available],
            AssemblerTrigger::StartTravel => &[Assigned],
            AssemblerTrigger::ArriveAtSite => &[EnRoute],
            AssemblerTrigger::CompleteTask => &[Working],
            AssemblerTrigger::CancelTask => &[Assigned, EnRoute],
            AssemblerTrigger::AbortTask => &[Working],
        }
    }
}

impl fmt::Display for AssemblerTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssemblerTrigger::AssignTask => write!(f, "ASSIGN_TASK"),
            AssemblerTrigger::StartTravel => write!(f, "START_TRAVEL"),
            AssemblerTrigger::ArriveAtSite => write!(f, "ARRIVE_AT_SITE"),
            AssemblerTrigger::CompleteTask => write!(f, "COMPLETE_TASK"),
            AssemblerTrigger::CancelTask => write!(f, "CANCEL_TASK"),
            AssemblerTrigger::AbortTask => write!(f, "ABORT_TASK"),
        }
    }
}

/// 转换表中的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRow {
    pub from: AssemblerStatus,
    pub allowed: Vec<AssemblerStatus>,
}

// ==========================================
// AssemblerStatusMachine - 纯函数状态机
// ==========================================
pub struct AssemblerStatusMachine;

impl AssemblerStatusMachine {
    /// 当前状态允许的目标状态 (按表顺序)
    ///
    /// | From      | Allowed To          |
    /// |-----------|---------------------|
    /// | AVAILABLE | ASSIGNED            |
    /// | ASSIGNED  | EN_ROUTE, AVAILABLE |
    /// | EN_ROUTE  | WORKING, AVAILABLE  |
    /// | WORKING   | AVAILABLE           |
    pub fn valid_next_statuses(current: AssemblerStatus) -> &'static [AssemblerStatus] {
        match current {
            Available => &[Assigned],
            Assigned => &[EnRoute, Available],
            EnRoute => &[Working, Available],
            Working => &[Available],
        }
    }

    /// 是否允许 from → to (自环一律不允许)
    pub fn can_transition(from: AssemblerStatus, to: AssemblerStatus) -> bool {
        Self::valid_next_statuses(from).contains(&to)
    }

    /// 校验状态转换
    ///
    /// # 返回
    /// - Ok(()): 合法
    /// - Err(InvalidTransitionError): 携带当前状态、目标状态和允许的目标状态
    pub fn validate_transition(
        from: AssemblerStatus,
        to: AssemblerStatus,
        assembler_id: Option<&str>,
    ) -> Result<(), InvalidTransitionError> {
        if Self::can_transition(from, to) {
            return Ok(());
        }

        Err(InvalidTransitionError {
            from,
            to,
            allowed: Self::valid_next_statuses(from).to_vec(),
            assembler_id: assembler_id.map(str::to_string),
        })
    }

    /// 是否可以接新任务 (仅 AVAILABLE)
    pub fn can_assign_task(status: AssemblerStatus) -> bool {
        status == Available
    }

    /// 该状态是否必须持有任务 (除 AVAILABLE 外均需要)
    pub fn requires_active_task(status: AssemblerStatus) -> bool {
        status != Available
    }

    /// 校验状态与当前任务是否一致
    ///
    /// 任何状态或任务引用变更之后都必须调用
    pub fn validate_task_assignment(
        status: AssemblerStatus,
        active_task_id: Option<&str>,
    ) -> Result<(), InvariantViolationError> {
        match (Self::requires_active_task(status), active_task_id) {
            (false, Some(task_id)) => Err(InvariantViolationError::AvailableWithActiveTask {
                active_task_id: task_id.to_string(),
            }),
            (true, None) => Err(InvariantViolationError::MissingActiveTask { status }),
            _ => Ok(()),
        }
    }

    /// 对装配工快照执行一致性校验
    pub fn validate_assembler(assembler: &Assembler) -> Result<(), InvariantViolationError> {
        Self::validate_task_assignment(assembler.status, assembler.active_task_id.as_deref())
    }

    /// 按触发器计算目标状态
    ///
    /// 触发器不适用于当前状态时返回 InvalidTransitionError
    pub fn apply_trigger(
        from: AssemblerStatus,
        trigger: AssemblerTrigger,
        assembler_id: Option<&str>,
    ) -> Result<AssemblerStatus, InvalidTransitionError> {
        let to = trigger.target();
        if !trigger.sources().contains(&from) {
            return Err(InvalidTransitionError {
                from,
                to,
                allowed: Self::valid_next_statuses(from).to_vec(),
                assembler_id: assembler_id.map(str::to_string),
            });
        }
        Self::validate_transition(from, to, assembler_id)?;
        Ok(to)
    }

    /// 完整转换表
    pub fn transition_table() -> Vec<TransitionRow> {
        AssemblerStatus::ALL
            .iter()
            .map(|&from| TransitionRow {
                from,
                allowed: Self::valid_next_statuses(from).to_vec(),
            })
            .collect()
    }
}
