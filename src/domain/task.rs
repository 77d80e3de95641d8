// ==========================================
// 家具安装派工系统 - 安装任务实体
// ==========================================
// 多人派工: assigned_assembler_ids 为列表
// 每个装配工各自持有 (状态, 当前任务) 对
// ==========================================

use crate::domain::types::{JobEventType, SkillLevel, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 任务历史事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobEvent {
    #[serde(rename = "type")]
    pub event_type: JobEventType,
    pub timestamp: DateTime<Utc>,
    pub description: String,
}

impl JobEvent {
    pub fn new(event_type: JobEventType, timestamp: DateTime<Utc>, description: impl Into<String>) -> Self {
        Self {
            event_type,
            timestamp,
            description: description.into(),
        }
    }
}

// ==========================================
// AssemblyTask - 安装任务快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyTask {
    pub id: String,
    pub order_id: String,
    pub status: TaskStatus,
    pub required_skill: SkillLevel,
    pub estimated_duration_minutes: u32,

    #[serde(default)]
    pub assigned_assembler_ids: Vec<String>,

    #[serde(default)]
    pub scheduled_time: Option<DateTime<Utc>>,

    /// 生命周期事件 (按时间顺序追加)
    #[serde(default)]
    pub history: Vec<JobEvent>,
}

impl AssemblyTask {
    pub fn is_assigned_to(&self, assembler_id: &str) -> bool {
        self.assigned_assembler_ids.iter().any(|id| id == assembler_id)
    }

    pub fn last_event(&self) -> Option<&JobEvent> {
        self.history.last()
    }
}
