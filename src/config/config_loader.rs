// ==========================================
// 家具安装派工系统 - 配置加载器
// ==========================================
// 职责: 配置加载、默认值回退、合法性校验
// 存储: JSON 文件 (缺失时使用默认值)
// ==========================================

use crate::config::scoring_profile::{ScoringProfile, TaskDefaults};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "ASSEMBLY_DISPATCH_CONFIG";

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: path={path}, {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件解析失败: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("配置值非法 (field={field}): {message}")]
    InvalidValue { field: String, message: String },
}

// ==========================================
// DispatchConfig - 顶层配置
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DispatchConfig {
    pub scoring: ScoringProfile,
    pub task_defaults: TaskDefaults,
}

impl DispatchConfig {
    /// 从 JSON 字符串解析并校验
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: DispatchConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// 从文件加载
    ///
    /// 文件不存在时返回默认配置, 其余 I/O 错误照常上抛
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => {
                let config = Self::from_json(&raw)?;
                tracing::info!("已加载配置: {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("配置文件不存在, 使用默认配置: {}", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }

    /// 按优先级加载: 显式路径 > 环境变量 > 用户配置目录
    pub fn load_from(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => match std::env::var_os(CONFIG_PATH_ENV) {
                Some(p) => PathBuf::from(p),
                None => default_config_path(),
            },
        };
        Self::load(&path)
    }

    /// 校验配置值
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.scoring;

        check_positive("scoring.earthRadiusKm", s.earth_radius_km)?;
        check_positive("scoring.maxRating", s.max_rating)?;
        check_non_negative("scoring.distanceBaseScore", s.distance_base_score)?;
        check_non_negative("scoring.distancePenaltyPerKm", s.distance_penalty_per_km)?;
        check_non_negative("scoring.qualifiedBonus", s.qualified_bonus)?;
        check_non_negative("scoring.skillGapPenalty", s.skill_gap_penalty)?;
        check_non_negative("scoring.ratingWeight", s.rating_weight)?;
        check_non_negative("scoring.availableBonus", s.available_bonus)?;
        check_non_negative("scoring.busyPenalty", s.busy_penalty)?;
        check_non_negative("scoring.nearbyThresholdKm", s.nearby_threshold_km)?;

        if !(0.0..=s.max_rating).contains(&s.top_rated_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "scoring.topRatedThreshold".to_string(),
                message: format!(
                    "必须在 [0, {}] 范围内, 实际 {}",
                    s.max_rating, s.top_rated_threshold
                ),
            });
        }

        if self.task_defaults.estimated_duration_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "taskDefaults.estimatedDurationMinutes".to_string(),
                message: "必须大于 0".to_string(),
            });
        }

        Ok(())
    }
}

/// 默认配置文件路径
///
/// `<config_dir>/assembly-dispatch/config.json`, 无法获取用户目录时回退到当前目录
pub fn default_config_path() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join("assembly-dispatch").join("config.json"),
        None => PathBuf::from("./assembly-dispatch.json"),
    }
}

fn check_positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: field.to_string(),
            message: format!("必须为正数, 实际 {}", value),
        })
    }
}

fn check_non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: field.to_string(),
            message: format!("不能为负数, 实际 {}", value),
        })
    }
}
