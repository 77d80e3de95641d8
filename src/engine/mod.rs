// ==========================================
// 家具安装派工系统 - 引擎层
// ==========================================
// 职责: 派工推荐与状态判定, 纯计算
// 红线: 不做 I/O, 不修改输入快照, 所有判定必须可解释
// ==========================================

pub mod assembler_fsm;
pub mod assignment;
pub mod error;
pub mod recommendation;
pub mod task_factory;
pub mod task_lifecycle;

// 重导出核心引擎
pub use assembler_fsm::{AssemblerStatusMachine, AssemblerTrigger, TransitionRow};
pub use assignment::{AssignmentDecision, AssignmentPlanner};
pub use error::{AssignmentError, InvalidTransitionError, InvariantViolationError};
pub use recommendation::{recommend, RecommendationEngine};
pub use task_factory::TaskFactory;
pub use task_lifecycle::{LifecycleDecision, TaskLifecycle};
