// ==========================================
// 家具安装派工系统 - 派工推荐结果
// ==========================================
// 非持久化对象, 每次请求重新计算
// ==========================================

use crate::domain::assembler::Assembler;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 匹配原因标签
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchReason {
    #[serde(rename = "Nearby (<5km)")]
    Nearby,
    #[serde(rename = "Top Rated")]
    TopRated,
    #[serde(rename = "Perfect Skill Match")]
    PerfectSkillMatch,
    #[serde(rename = "Available")]
    Available,
    /// 警告: 技能不足
    #[serde(rename = "Skill Gap")]
    SkillGap,
    /// 警告: 已有任务
    #[serde(rename = "Busy")]
    Busy,
}

impl MatchReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchReason::Nearby => "Nearby (<5km)",
            MatchReason::TopRated => "Top Rated",
            MatchReason::PerfectSkillMatch => "Perfect Skill Match",
            MatchReason::Available => "Available",
            MatchReason::SkillGap => "Skill Gap",
            MatchReason::Busy => "Busy",
        }
    }

    /// 是否为警告类标签
    pub fn is_warning(&self) -> bool {
        matches!(self, MatchReason::SkillGap | MatchReason::Busy)
    }
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 评分明细 (可解释性)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// 大圆距离 (km), 坐标无效时为 +∞
    pub distance_km: f64,
    pub distance_score: f64,
    pub skill_score: f64,
    pub rating_score: f64,
    pub availability_score: f64,
}

impl ScoreBreakdown {
    /// 四项之和 (未取整)
    pub fn raw_total(&self) -> f64 {
        self.distance_score + self.skill_score + self.rating_score + self.availability_score
    }
}

// ==========================================
// AssignmentRecommendation - 单个候选
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRecommendation {
    pub assembler: Assembler,
    pub score: i64,
    pub match_reasons: Vec<MatchReason>,
    pub breakdown: ScoreBreakdown,
}

impl AssignmentRecommendation {
    pub fn has_reason(&self, reason: MatchReason) -> bool {
        self.match_reasons.contains(&reason)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &MatchReason> {
        self.match_reasons.iter().filter(|r| r.is_warning())
    }
}
