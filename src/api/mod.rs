// ==========================================
// 家具安装派工系统 - API层
// ==========================================
// 职责: 面向调度界面的接口, 组合引擎调用并转换错误
// ==========================================

pub mod dispatch_api;
pub mod error;

pub use dispatch_api::{DispatchApi, InvariantIssue};
pub use error::{ApiError, ApiResult};
