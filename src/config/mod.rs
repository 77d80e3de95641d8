// ==========================================
// 家具安装派工系统 - 配置层
// ==========================================
// 职责: 评分参数与任务默认值, 支持文件覆写
// 存储: JSON 文件
// ==========================================

pub mod config_loader;
pub mod scoring_profile;

// 重导出核心配置
pub use config_loader::{default_config_path, ConfigError, DispatchConfig, CONFIG_PATH_ENV};
pub use scoring_profile::{ScoringProfile, TaskDefaults};
