// ==========================================
// 家具安装派工系统 - 调度 API
// ==========================================
// 职责: 在调用方持有的快照上组合引擎调用
// 流程: 查快照 → 引擎判定 → 判定成功后替换快照中的实体
// 说明: 持久化仍由外部负责, 本层只维护内存快照的一致性
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::DispatchConfig;
use crate::domain::assembler::Assembler;
use crate::domain::order::Order;
use crate::domain::recommendation::AssignmentRecommendation;
use crate::domain::snapshot::DispatchSnapshot;
use crate::domain::task::AssemblyTask;
use crate::domain::types::{AssemblerStatus, TaskStatus};
use crate::engine::{
    AssemblerStatusMachine, AssemblerTrigger, AssignmentDecision, AssignmentPlanner,
    LifecycleDecision, RecommendationEngine, TaskFactory, TaskLifecycle,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// 快照审计发现的不一致
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvariantIssue {
    pub assembler_id: String,
    pub status: AssemblerStatus,
    pub active_task_id: Option<String>,
    pub message: String,
}

// ==========================================
// DispatchApi
// ==========================================
pub struct DispatchApi {
    snapshot: DispatchSnapshot,
    config: DispatchConfig,
    engine: RecommendationEngine,
}

impl DispatchApi {
    pub fn new(snapshot: DispatchSnapshot, config: DispatchConfig) -> Self {
        let engine = RecommendationEngine::new(config.scoring.clone());
        Self {
            snapshot,
            config,
            engine,
        }
    }

    pub fn snapshot(&self) -> &DispatchSnapshot {
        &self.snapshot
    }

    pub fn into_snapshot(self) -> DispatchSnapshot {
        self.snapshot
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn task(&self, task_id: &str) -> ApiResult<&AssemblyTask> {
        self.snapshot
            .task(task_id)
            .ok_or_else(|| ApiError::NotFound(format!("Task(id={})不存在", task_id)))
    }

    pub fn assembler(&self, assembler_id: &str) -> ApiResult<&Assembler> {
        self.snapshot
            .assembler(assembler_id)
            .ok_or_else(|| ApiError::NotFound(format!("Assembler(id={})不存在", assembler_id)))
    }

    pub fn order(&self, order_id: &str) -> ApiResult<&Order> {
        self.snapshot
            .order(order_id)
            .ok_or_else(|| ApiError::NotFound(format!("Order(id={})不存在", order_id)))
    }

    /// 待派工任务
    pub fn open_tasks(&self) -> Vec<&AssemblyTask> {
        self.snapshot
            .tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Open)
            .collect()
    }

    /// 可接单的装配工
    pub fn available_assemblers(&self) -> Vec<&Assembler> {
        self.snapshot
            .assemblers
            .iter()
            .filter(|a| AssemblerStatusMachine::can_assign_task(a.status) && !a.is_busy())
            .collect()
    }

    // ==========================================
    // 推荐
    // ==========================================

    /// 为任务生成推荐列表 (任务位置取自订单地址)
    #[instrument(skip(self))]
    pub fn recommend_for_task(&self, task_id: &str) -> ApiResult<Vec<AssignmentRecommendation>> {
        let task = self.task(task_id)?;
        let order = self.order(&task.order_id)?;

        Ok(self.engine.recommend(
            task,
            &self.snapshot.assemblers,
            order.address.coordinates(),
        ))
    }

    // ==========================================
    // 变更 (判定成功后才替换快照)
    // ==========================================

    /// 新订单入池, 同时生成 OPEN 任务
    pub fn register_order(&mut self, order: Order, at: DateTime<Utc>) -> ApiResult<AssemblyTask> {
        if self.snapshot.order(&order.id).is_some() {
            return Err(ApiError::InvalidInput(format!("订单已存在: {}", order.id)));
        }
        if !order.address.coordinates().is_valid() {
            return Err(ApiError::InvalidInput(format!(
                "订单 {} 地址坐标无效: ({}, {})",
                order.id, order.address.lat, order.address.lng
            )));
        }

        let task = TaskFactory::task_for_order(&order, &self.config.task_defaults, at);
        self.snapshot.orders.push(order);
        self.snapshot.upsert_task(task.clone());
        Ok(task)
    }

    /// 新装配工入池
    ///
    /// # 规则
    /// 1. id 不可重复
    /// 2. 至少具备一项技能, 评分在 [0, max_rating] 内, 坐标合法
    /// 3. 只接受空闲且未持有任务的快照
    pub fn register_assembler(&mut self, assembler: Assembler) -> ApiResult<Assembler> {
        if self.snapshot.assembler(&assembler.id).is_some() {
            return Err(ApiError::InvalidInput(format!(
                "装配工已存在: {}",
                assembler.id
            )));
        }
        validate_new_assembler(&assembler, self.config.scoring.max_rating)?;

        tracing::info!(
            "装配工入池: id={}, skills={:?}, rating={}",
            assembler.id,
            assembler.skills,
            assembler.rating
        );
        self.snapshot.assemblers.push(assembler.clone());
        Ok(assembler)
    }

    /// 派工
    #[instrument(skip(self, at))]
    pub fn assign(
        &mut self,
        task_id: &str,
        assembler_ids: &[String],
        at: DateTime<Utc>,
    ) -> ApiResult<AssignmentDecision> {
        let task = self.task(task_id)?;
        let decision =
            AssignmentPlanner::plan_assignment(task, &self.snapshot.assemblers, assembler_ids, at)?;

        self.snapshot.upsert_task(decision.task.clone());
        for assembler in &decision.assemblers {
            self.snapshot.upsert_assembler(assembler.clone());
        }
        Ok(decision)
    }

    /// 触发装配工状态变更
    #[instrument(skip(self, at))]
    pub fn fire_trigger(
        &mut self,
        task_id: &str,
        assembler_id: &str,
        trigger: AssemblerTrigger,
        at: DateTime<Utc>,
    ) -> ApiResult<LifecycleDecision> {
        let task = self.task(task_id)?;
        let assembler = self.assembler(assembler_id)?;
        let decision = TaskLifecycle::apply_trigger(
            task,
            assembler,
            &self.snapshot.assemblers,
            trigger,
            at,
        )?;

        self.snapshot.upsert_task(decision.task.clone());
        self.snapshot.upsert_assembler(decision.assembler.clone());
        Ok(decision)
    }

    /// 直接校验一次状态变更 (不修改快照)
    pub fn check_transition(&self, assembler_id: &str, to: AssemblerStatus) -> ApiResult<()> {
        let assembler = self.assembler(assembler_id)?;
        AssemblerStatusMachine::validate_transition(assembler.status, to, Some(assembler_id))?;
        Ok(())
    }

    // ==========================================
    // 审计
    // ==========================================

    /// 列出 (状态, 当前任务) 不一致的装配工
    pub fn audit(&self) -> Vec<InvariantIssue> {
        let issues: Vec<InvariantIssue> = self
            .snapshot
            .assemblers
            .iter()
            .filter_map(|a| {
                AssemblerStatusMachine::validate_assembler(a)
                    .err()
                    .map(|e| InvariantIssue {
                        assembler_id: a.id.clone(),
                        status: a.status,
                        active_task_id: a.active_task_id.clone(),
                        message: e.to_string(),
                    })
            })
            .collect();

        if !issues.is_empty() {
            tracing::warn!("快照审计发现 {} 个不一致的装配工", issues.len());
        }
        issues
    }
}

fn validate_new_assembler(assembler: &Assembler, max_rating: f64) -> ApiResult<()> {
    if assembler.skills.is_empty() {
        return Err(ApiError::InvalidInput(format!(
            "装配工 {} 至少需要一项技能",
            assembler.id
        )));
    }
    if !assembler.rating.is_finite() || !(0.0..=max_rating).contains(&assembler.rating) {
        return Err(ApiError::InvalidInput(format!(
            "装配工 {} 评分超出范围 [0, {}]: {}",
            assembler.id, max_rating, assembler.rating
        )));
    }
    if !assembler.current_location.coordinates().is_valid() {
        return Err(ApiError::InvalidInput(format!(
            "装配工 {} 坐标无效",
            assembler.id
        )));
    }
    if !AssemblerStatusMachine::can_assign_task(assembler.status) || assembler.is_busy() {
        return Err(ApiError::InvalidInput(format!(
            "新装配工必须为 AVAILABLE 且无当前任务: status={}, active_task_id={:?}",
            assembler.status, assembler.active_task_id
        )));
    }
    Ok(())
}
