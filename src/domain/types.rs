// ==========================================
// 家具安装派工系统 - 领域类型定义
// ==========================================
// 职责: 技能等级、装配工状态、任务状态、任务事件类型
// 序列化格式: SCREAMING_SNAKE_CASE (与前端快照一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 技能等级 (Skill Level)
// ==========================================
// 顺序: Easy < Medium < Hard, 高等级覆盖低等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillLevel {
    Easy,   // 简单
    Medium, // 中等
    Hard,   // 困难
}

impl SkillLevel {
    /// 数值等级 (EASY=1, MEDIUM=2, HARD=3)
    pub fn value(self) -> u8 {
        match self {
            SkillLevel::Easy => 1,
            SkillLevel::Medium => 2,
            SkillLevel::Hard => 3,
        }
    }

    /// 当前等级是否可以完成 `required` 等级的任务
    pub fn covers(self, required: SkillLevel) -> bool {
        self >= required
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkillLevel::Easy => write!(f, "EASY"),
            SkillLevel::Medium => write!(f, "MEDIUM"),
            SkillLevel::Hard => write!(f, "HARD"),
        }
    }
}

// ==========================================
// 装配工状态 (Assembler Status)
// ==========================================
// 状态流: AVAILABLE → ASSIGNED → EN_ROUTE → WORKING → AVAILABLE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssemblerStatus {
    Available, // 空闲
    Assigned,  // 已派工
    EnRoute,   // 在途
    Working,   // 作业中
}

impl AssemblerStatus {
    /// 全部状态 (按状态流顺序)
    pub const ALL: [AssemblerStatus; 4] = [
        AssemblerStatus::Available,
        AssemblerStatus::Assigned,
        AssemblerStatus::EnRoute,
        AssemblerStatus::Working,
    ];
}

impl Default for AssemblerStatus {
    fn default() -> Self {
        AssemblerStatus::Available
    }
}

impl fmt::Display for AssemblerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssemblerStatus::Available => write!(f, "AVAILABLE"),
            AssemblerStatus::Assigned => write!(f, "ASSIGNED"),
            AssemblerStatus::EnRoute => write!(f, "EN_ROUTE"),
            AssemblerStatus::Working => write!(f, "WORKING"),
        }
    }
}

// ==========================================
// 任务状态 (Task Status)
// ==========================================
// 与装配工状态独立: 任务侧单独记录 ISSUE / CANCELLED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Open,       // 待派工
    Assigned,   // 已派工
    EnRoute,    // 在途
    #[serde(alias = "WORKING")]
    InProgress, // 作业中
    Completed,  // 已完成
    Issue,      // 异常
    Cancelled,  // 已取消
}

impl TaskStatus {
    /// 推进顺序 (多人任务只允许向前推进)
    ///
    /// COMPLETED / ISSUE / CANCELLED 都是终态, 共用最高序号
    pub fn progress_rank(self) -> u8 {
        match self {
            TaskStatus::Open => 0,
            TaskStatus::Assigned => 1,
            TaskStatus::EnRoute => 2,
            TaskStatus::InProgress => 3,
            TaskStatus::Completed | TaskStatus::Issue | TaskStatus::Cancelled => 4,
        }
    }

    /// 是否为终态
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TaskStatus::Completed | TaskStatus::Issue | TaskStatus::Cancelled
        )
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Open => write!(f, "OPEN"),
            TaskStatus::Assigned => write!(f, "ASSIGNED"),
            TaskStatus::EnRoute => write!(f, "EN_ROUTE"),
            TaskStatus::InProgress => write!(f, "IN_PROGRESS"),
            TaskStatus::Completed => write!(f, "COMPLETED"),
            TaskStatus::Issue => write!(f, "ISSUE"),
            TaskStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

// ==========================================
// 任务事件类型 (Job Event Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobEventType {
    JobCreated,
    WorkerAssigned,
    WorkerEnroute,
    JobStarted,
    JobCompleted,
    IssueReported,
}

impl JobEventType {
    pub fn as_str(&self) -> &str {
        match self {
            JobEventType::JobCreated => "job_created",
            JobEventType::WorkerAssigned => "worker_assigned",
            JobEventType::WorkerEnroute => "worker_enroute",
            JobEventType::JobStarted => "job_started",
            JobEventType::JobCompleted => "job_completed",
            JobEventType::IssueReported => "issue_reported",
        }
    }
}

impl fmt::Display for JobEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
