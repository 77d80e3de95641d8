// ==========================================
// 家具安装派工系统 - 派工决策
// ==========================================
// 职责: 将 "任务 T 派给装配工 [A…]" 转为经过校验的决策
// 输入: 任务快照 + 装配工池 + 选中的装配工 id
// 输出: 新的任务快照 + 新的装配工快照 (不修改输入)
// ==========================================
// 多人派工: 每个装配工独立持有 (状态, 当前任务) 对,
//           状态机契约逐人校验
// ==========================================

use crate::domain::assembler::Assembler;
use crate::domain::task::{AssemblyTask, JobEvent};
use crate::domain::types::{AssemblerStatus, JobEventType, TaskStatus};
use crate::engine::assembler_fsm::AssemblerStatusMachine;
use crate::engine::error::AssignmentError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::instrument;

/// 派工决策结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDecision {
    pub task: AssemblyTask,
    /// 状态已更新的装配工 (按请求顺序)
    pub assemblers: Vec<Assembler>,
    /// 不阻断派工的提示 (如技能不足)
    pub warnings: Vec<String>,
}

pub struct AssignmentPlanner;

impl AssignmentPlanner {
    /// 生成派工决策
    ///
    /// # 规则
    /// 1. 至少一个装配工, 不允许重复, 必须存在于池中
    /// 2. 任务状态必须为 OPEN 或 ASSIGNED (已派工任务可追加帮手)
    /// 3. 装配工必须可接单且快照自身一致 (不一致直接报错, 不修复)
    /// 4. AVAILABLE → ASSIGNED 经状态机校验, 变更后再次校验一致性
    /// 5. 技能不足不阻断, 记入 warnings
    #[instrument(skip(task, pool), fields(task_id = %task.id))]
    pub fn plan_assignment(
        task: &AssemblyTask,
        pool: &[Assembler],
        assembler_ids: &[String],
        at: DateTime<Utc>,
    ) -> Result<AssignmentDecision, AssignmentError> {
        if assembler_ids.is_empty() {
            return Err(AssignmentError::EmptyAssignment);
        }

        if !matches!(task.status, TaskStatus::Open | TaskStatus::Assigned) {
            return Err(AssignmentError::TaskNotAssignable {
                task_id: task.id.clone(),
                status: task.status,
            });
        }

        let mut seen = HashSet::new();
        for id in assembler_ids {
            if !seen.insert(id.as_str()) || task.is_assigned_to(id) {
                return Err(AssignmentError::DuplicateAssembler(id.clone()));
            }
        }

        let mut updated_task = task.clone();
        let mut updated_assemblers = Vec::with_capacity(assembler_ids.len());
        let mut warnings = Vec::new();

        for id in assembler_ids {
            let assembler = pool
                .iter()
                .find(|a| &a.id == id)
                .ok_or_else(|| AssignmentError::AssemblerNotFound(id.clone()))?;

            let updated = Self::assign_one(assembler, &task.id)?;

            if !assembler.is_qualified_for(task.required_skill) {
                warnings.push(format!(
                    "装配工 {} 技能不足: 需要 {}, 最高 {}",
                    assembler.id,
                    task.required_skill,
                    assembler
                        .max_skill()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "无".to_string())
                ));
            }

            updated_task.assigned_assembler_ids.push(assembler.id.clone());
            updated_task.history.push(JobEvent::new(
                JobEventType::WorkerAssigned,
                at,
                format!("已派工给 {} ({})", assembler.name, assembler.id),
            ));
            updated_assemblers.push(updated);
        }

        updated_task.status = TaskStatus::Assigned;
        if updated_task.scheduled_time.is_none() {
            updated_task.scheduled_time = Some(at);
        }

        tracing::info!(
            "派工决策生成: task_id={}, assemblers={:?}, warnings={}",
            updated_task.id,
            assembler_ids,
            warnings.len()
        );

        Ok(AssignmentDecision {
            task: updated_task,
            assemblers: updated_assemblers,
            warnings,
        })
    }

    /// 单个装配工 AVAILABLE → ASSIGNED
    fn assign_one(assembler: &Assembler, task_id: &str) -> Result<Assembler, AssignmentError> {
        let invariant = |source| AssignmentError::InvariantViolation {
            assembler_id: assembler.id.clone(),
            source,
        };

        AssemblerStatusMachine::validate_assembler(assembler).map_err(invariant)?;

        if !AssemblerStatusMachine::can_assign_task(assembler.status) {
            return Err(AssignmentError::AssemblerUnavailable {
                assembler_id: assembler.id.clone(),
                status: assembler.status,
            });
        }

        AssemblerStatusMachine::validate_transition(
            assembler.status,
            AssemblerStatus::Assigned,
            Some(&assembler.id),
        )?;

        let mut updated = assembler.clone();
        updated.status = AssemblerStatus::Assigned;
        updated.active_task_id = Some(task_id.to_string());

        AssemblerStatusMachine::validate_assembler(&updated).map_err(invariant)?;
        Ok(updated)
    }
}
