use crate::domain::types::SkillLevel;
use serde::{Deserialize, Serialize};

/// 推荐评分参数
///
/// 默认值即派工推荐的标准启发式:
/// 距离分 = max(0, 100 - 2×km), 技能 +50 / -100, 评分线性映射到 0~100, 空闲 +50 / 忙碌 -50
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoringProfile {
    /// 地球半径 (km), 用于 haversine 距离
    pub earth_radius_km: f64,

    /// 距离分基准 (0km 时的得分)
    pub distance_base_score: f64,

    /// 每公里扣分
    pub distance_penalty_per_km: f64,

    /// 具备技能加分
    pub qualified_bonus: f64,

    /// 技能不足扣分 (正数, 计算时取负)
    pub skill_gap_penalty: f64,

    /// 评分满分对应的得分
    pub rating_weight: f64,

    /// 评分上限
    pub max_rating: f64,

    /// 空闲加分
    pub available_bonus: f64,

    /// 忙碌扣分 (正数, 计算时取负)
    pub busy_penalty: f64,

    /// "Nearby" 标签阈值 (km, 严格小于)
    pub nearby_threshold_km: f64,

    /// "Top Rated" 标签阈值 (大于等于)
    pub top_rated_threshold: f64,
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self {
            earth_radius_km: 6371.0,
            distance_base_score: 100.0,
            distance_penalty_per_km: 2.0,
            qualified_bonus: 50.0,
            skill_gap_penalty: 100.0,
            rating_weight: 100.0,
            max_rating: 5.0,
            available_bonus: 50.0,
            busy_penalty: 50.0,
            nearby_threshold_km: 5.0,
            top_rated_threshold: 4.8,
        }
    }
}

/// 新建任务默认值 (下单时自动生成 OPEN 任务)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskDefaults {
    pub required_skill: SkillLevel,
    pub estimated_duration_minutes: u32,
}

impl Default for TaskDefaults {
    fn default() -> Self {
        Self {
            required_skill: SkillLevel::Medium,
            estimated_duration_minutes: 60,
        }
    }
}
