// ==========================================
// 家具安装派工系统 - 派工推荐引擎
// ==========================================
// 职责: 对候选装配工评分并排序, 供调度员选择
// 输入: 任务 + 候选池 + 任务位置
// 输出: 按总分降序的推荐列表 (含评分明细与匹配原因)
// ==========================================
// 红线: 不过滤候选 (技能不足/忙碌只降分并打警告标签),
//       不抛错, 纯函数, 相同输入得到相同输出
// ==========================================

mod scoring;


use crate::config::scoring_profile::ScoringProfile;
use crate::domain::assembler::Assembler;
use crate::domain::location::Coordinates;
use crate::domain::recommendation::{AssignmentRecommendation, MatchReason, ScoreBreakdown};
use crate::domain::task::AssemblyTask;
use tracing::instrument;

// ==========================================
// RecommendationEngine - 派工推荐引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    profile: ScoringProfile,
}

impl RecommendationEngine {
    pub fn new(profile: ScoringProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &ScoringProfile {
        &self.profile
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 生成推荐列表
    ///
    /// 排序: 总分降序, 稳定排序 (同分保持输入顺序)
    ///
    /// # 参数
    /// - `task`: 待派工任务
    /// - `pool`: 候选装配工 (可为空)
    /// - `task_location`: 任务位置 (通常取自订单地址)
    #[instrument(skip(self, task, pool), fields(task_id = %task.id, pool_size = pool.len()))]
    pub fn recommend(
        &self,
        task: &AssemblyTask,
        pool: &[Assembler],
        task_location: Coordinates,
    ) -> Vec<AssignmentRecommendation> {
        let mut recommendations: Vec<AssignmentRecommendation> = pool
            .iter()
            .map(|assembler| self.evaluate(task, assembler, task_location))
            .collect();

        // Vec::sort_by 为稳定排序
        recommendations.sort_by(|a, b| b.score.cmp(&a.score));

        tracing::debug!(
            "推荐完成: task_id={}, candidates={}, top={:?}",
            task.id,
            recommendations.len(),
            recommendations.first().map(|r| (&r.assembler.id, r.score))
        );

        recommendations
    }

    /// 取前 `limit` 名
    pub fn recommend_top(
        &self,
        task: &AssemblyTask,
        pool: &[Assembler],
        task_location: Coordinates,
        limit: usize,
    ) -> Vec<AssignmentRecommendation> {
        let mut recommendations = self.recommend(task, pool, task_location);
        recommendations.truncate(limit);
        recommendations
    }

    /// 评估单个候选
    pub fn evaluate(
        &self,
        task: &AssemblyTask,
        assembler: &Assembler,
        task_location: Coordinates,
    ) -> AssignmentRecommendation {
        let profile = &self.profile;

        let distance_km = scoring::haversine_km(
            assembler.current_location.coordinates(),
            task_location,
            profile.earth_radius_km,
        );
        let max_skill = assembler.max_skill();
        let qualified = assembler.is_qualified_for(task.required_skill);
        let busy = assembler.is_busy();

        let breakdown = ScoreBreakdown {
            distance_km,
            distance_score: scoring::distance_score(distance_km, profile),
            skill_score: scoring::skill_score(qualified, profile),
            rating_score: scoring::rating_score(assembler.rating, profile),
            availability_score: scoring::availability_score(busy, profile),
        };

        let mut match_reasons = Vec::new();
        if scoring::is_nearby(distance_km, profile) {
            match_reasons.push(MatchReason::Nearby);
        }
        if scoring::sanitize_rating(assembler.rating, profile.max_rating)
            >= profile.top_rated_threshold
        {
            match_reasons.push(MatchReason::TopRated);
        }
        if qualified && max_skill == Some(task.required_skill) {
            match_reasons.push(MatchReason::PerfectSkillMatch);
        }
        if !busy {
            match_reasons.push(MatchReason::Available);
        }
        if !qualified {
            match_reasons.push(MatchReason::SkillGap);
        }
        if busy {
            match_reasons.push(MatchReason::Busy);
        }

        let score = scoring::round_half_up(breakdown.raw_total());

        tracing::trace!(
            "候选评分: assembler_id={}, distance_km={:.2}, score={}, breakdown={:?}",
            assembler.id,
            distance_km,
            score,
            breakdown
        );

        AssignmentRecommendation {
            assembler: assembler.clone(),
            score,
            match_reasons,
            breakdown,
        }
    }
}

/// 使用默认评分参数生成推荐列表
pub fn recommend(
    task: &AssemblyTask,
    pool: &[Assembler],
    task_location: Coordinates,
) -> Vec<AssignmentRecommendation> {
    RecommendationEngine::default().recommend(task, pool, task_location)
}
