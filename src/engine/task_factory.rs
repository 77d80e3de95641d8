// ==========================================
// 家具安装派工系统 - 任务生成
// ==========================================
// 每个新订单自动生成一个 OPEN 任务
// ==========================================

use crate::config::scoring_profile::TaskDefaults;
use crate::domain::order::Order;
use crate::domain::task::{AssemblyTask, JobEvent};
use crate::domain::types::{JobEventType, TaskStatus};
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub struct TaskFactory;

impl TaskFactory {
    /// 为订单生成待派工任务
    ///
    /// id 格式: `t-<uuid v4>`
    pub fn task_for_order(order: &Order, defaults: &TaskDefaults, at: DateTime<Utc>) -> AssemblyTask {
        let task_id = format!("t-{}", Uuid::new_v4());

        tracing::debug!(
            "订单生成任务: order_id={}, task_id={}, skill={}",
            order.id,
            task_id,
            defaults.required_skill
        );

        AssemblyTask {
            id: task_id,
            order_id: order.id.clone(),
            status: TaskStatus::Open,
            required_skill: defaults.required_skill,
            estimated_duration_minutes: defaults.estimated_duration_minutes,
            assigned_assembler_ids: Vec::new(),
            scheduled_time: None,
            history: vec![JobEvent::new(
                JobEventType::JobCreated,
                at,
                format!("订单 {} ({}) 创建任务", order.id, order.customer.name),
            )],
        }
    }
}
