// ==========================================
// 家具安装派工系统 - 核心库
// ==========================================
// 系统定位: 决策支持 (调度员最终确认)
// 核心: 派工推荐引擎 + 装配工状态机, 纯计算无 I/O
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 评分参数
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 调度接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    Assembler, AssemblerStatus, AssemblyTask, AssignmentRecommendation, Coordinates,
    DispatchSnapshot, JobEvent, JobEventType, Location, MatchReason, Order, SkillLevel,
    TaskStatus,
};

pub use engine::{
    recommend, AssemblerStatusMachine, AssemblerTrigger, AssignmentError, AssignmentPlanner,
    InvalidTransitionError, InvariantViolationError, RecommendationEngine, TaskFactory,
    TaskLifecycle,
};

pub use api::{ApiError, ApiResult, DispatchApi};
pub use config::DispatchConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "家具安装派工系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
