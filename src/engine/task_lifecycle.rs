// ==========================================
// 家具安装派工系统 - 任务生命周期
// ==========================================
// 职责: 装配工触发器 → 装配工状态变更 + 任务状态/历史事件
// 红线: 只返回新快照, 不修改输入
// ==========================================
// 触发器对任务的影响:
// - StartTravel  → EN_ROUTE     + worker_enroute
// - ArriveAtSite → IN_PROGRESS  + job_started
// - CompleteTask → COMPLETED    + job_completed
// - AbortTask    → ISSUE        + issue_reported
// - CancelTask   → 移出派工名单, 名单为空时任务回到 OPEN (无对应事件类型)
// 多人任务: 任务状态只向前推进;
//           仍有成员持有任务时完工/中止只记事件, 任务停在 IN_PROGRESS;
//           最后一名成员离场后结算终态, ISSUE 优先于 COMPLETED
// ==========================================

use crate::domain::assembler::Assembler;
use crate::domain::task::{AssemblyTask, JobEvent};
use crate::domain::types::{AssemblerStatus, JobEventType, TaskStatus};
use crate::engine::assembler_fsm::{AssemblerStatusMachine, AssemblerTrigger};
use crate::engine::assignment::AssignmentPlanner;
use crate::engine::error::AssignmentError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// 生命周期决策结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleDecision {
    pub task: AssemblyTask,
    pub assembler: Assembler,
    /// 本次追加到任务历史的事件
    pub event: Option<JobEvent>,
}

pub struct TaskLifecycle;

impl TaskLifecycle {
    /// 对任务上的某个装配工执行触发器
    ///
    /// AssignTask 委托给 AssignmentPlanner; 其余触发器要求装配工已在该任务上
    ///
    /// `crew` 为其他成员的当前快照 (可包含本人, 按 id 排除),
    /// 用于判断任务是否仍被他人持有; 不在 `crew` 中的成员视为已离场
    #[instrument(
        skip(task, assembler, crew),
        fields(task_id = %task.id, assembler_id = %assembler.id)
    )]
    pub fn apply_trigger(
        task: &AssemblyTask,
        assembler: &Assembler,
        crew: &[Assembler],
        trigger: AssemblerTrigger,
        at: DateTime<Utc>,
    ) -> Result<LifecycleDecision, AssignmentError> {
        if trigger == AssemblerTrigger::AssignTask {
            return Self::assign(task, assembler, at);
        }

        let invariant = |source| AssignmentError::InvariantViolation {
            assembler_id: assembler.id.clone(),
            source,
        };
        AssemblerStatusMachine::validate_assembler(assembler).map_err(invariant)?;

        if assembler.active_task_id.as_deref() != Some(task.id.as_str())
            || !task.is_assigned_to(&assembler.id)
        {
            return Err(AssignmentError::NotAssignedToTask {
                assembler_id: assembler.id.clone(),
                task_id: task.id.clone(),
            });
        }

        let next_status =
            AssemblerStatusMachine::apply_trigger(assembler.status, trigger, Some(&assembler.id))?;

        let mut updated_assembler = assembler.clone();
        updated_assembler.status = next_status;
        if next_status == AssemblerStatus::Available {
            updated_assembler.active_task_id = None;
        }
        AssemblerStatusMachine::validate_assembler(&updated_assembler).map_err(invariant)?;

        let mut updated_task = task.clone();
        let event = match trigger {
            AssemblerTrigger::StartTravel => {
                advance(&mut updated_task, TaskStatus::EnRoute);
                Some(JobEvent::new(
                    JobEventType::WorkerEnroute,
                    at,
                    format!("{} 已出发", assembler.name),
                ))
            }
            AssemblerTrigger::ArriveAtSite => {
                advance(&mut updated_task, TaskStatus::InProgress);
                Some(JobEvent::new(
                    JobEventType::JobStarted,
                    at,
                    format!("{} 已到场开工", assembler.name),
                ))
            }
            AssemblerTrigger::CompleteTask => Some(JobEvent::new(
                JobEventType::JobCompleted,
                at,
                format!("{} 已完工", assembler.name),
            )),
            AssemblerTrigger::AbortTask => Some(JobEvent::new(
                JobEventType::IssueReported,
                at,
                format!("{} 中止作业", assembler.name),
            )),
            AssemblerTrigger::CancelTask => {
                updated_task
                    .assigned_assembler_ids
                    .retain(|id| id != &assembler.id);
                if updated_task.assigned_assembler_ids.is_empty()
                    && !updated_task.status.is_terminal()
                {
                    updated_task.status = TaskStatus::Open;
                    updated_task.scheduled_time = None;
                }
                None
            }
            AssemblerTrigger::AssignTask => None,
        };

        if let Some(ref e) = event {
            updated_task.history.push(e.clone());
        }

        match trigger {
            AssemblerTrigger::CompleteTask | AssemblerTrigger::AbortTask => {
                if held_by_others(&updated_task, &assembler.id, crew) {
                    advance(&mut updated_task, TaskStatus::InProgress);
                } else {
                    settle(&mut updated_task);
                }
            }
            AssemblerTrigger::CancelTask => {
                if !updated_task.assigned_assembler_ids.is_empty()
                    && !held_by_others(&updated_task, &assembler.id, crew)
                {
                    settle(&mut updated_task);
                }
            }
            _ => {}
        }

        tracing::info!(
            "触发器已应用: trigger={}, assembler {} → {}, task {} → {}",
            trigger,
            assembler.status,
            updated_assembler.status,
            task.status,
            updated_task.status
        );

        Ok(LifecycleDecision {
            task: updated_task,
            assembler: updated_assembler,
            event,
        })
    }

    fn assign(
        task: &AssemblyTask,
        assembler: &Assembler,
        at: DateTime<Utc>,
    ) -> Result<LifecycleDecision, AssignmentError> {
        let mut decision = AssignmentPlanner::plan_assignment(
            task,
            std::slice::from_ref(assembler),
            std::slice::from_ref(&assembler.id),
            at,
        )?;

        let updated_assembler = decision
            .assemblers
            .pop()
            .ok_or(AssignmentError::EmptyAssignment)?;
        let event = decision.task.last_event().cloned();

        Ok(LifecycleDecision {
            task: decision.task,
            assembler: updated_assembler,
            event,
        })
    }
}

/// 任务状态只向前推进
fn advance(task: &mut AssemblyTask, status: TaskStatus) {
    if status.progress_rank() > task.status.progress_rank() {
        task.status = status;
    }
}

/// 名单中除 `acting_id` 外是否还有成员持有该任务
fn held_by_others(task: &AssemblyTask, acting_id: &str, crew: &[Assembler]) -> bool {
    task.assigned_assembler_ids
        .iter()
        .filter(|id| id.as_str() != acting_id)
        .any(|id| {
            crew.iter()
                .any(|a| &a.id == id && a.active_task_id.as_deref() == Some(task.id.as_str()))
        })
}

/// 全员离场后按历史结算终态: ISSUE 优先于 COMPLETED, CANCELLED 不覆盖
fn settle(task: &mut AssemblyTask) {
    if task.status == TaskStatus::Cancelled {
        return;
    }
    let reported = |event_type: JobEventType| task.history.iter().any(|e| e.event_type == event_type);
    let outcome = if reported(JobEventType::IssueReported) {
        Some(TaskStatus::Issue)
    } else if reported(JobEventType::JobCompleted) {
        Some(TaskStatus::Completed)
    } else {
        None
    };
    if let Some(status) = outcome {
        task.status = status;
    }
}
