// ==========================================
// 家具安装派工系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含数据访问逻辑, 不含引擎逻辑
// ==========================================

pub mod assembler;
pub mod location;
pub mod order;
pub mod recommendation;
pub mod snapshot;
pub mod task;
pub mod types;

// 重导出核心类型
pub use assembler::Assembler;
pub use location::{Coordinates, Location};
pub use order::{Customer, Item, Order, TimeWindow};
pub use recommendation::{AssignmentRecommendation, MatchReason, ScoreBreakdown};
pub use snapshot::DispatchSnapshot;
pub use task::{AssemblyTask, JobEvent};
pub use types::{AssemblerStatus, JobEventType, SkillLevel, TaskStatus};
