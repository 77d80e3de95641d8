use crate::config::scoring_profile::ScoringProfile;
use crate::domain::location::Coordinates;

/// 大圆距离 (haversine, km)
///
/// 坐标含非有限值时返回 +∞, 由距离分落到 0
pub(crate) fn haversine_km(a: Coordinates, b: Coordinates, earth_radius_km: f64) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    let distance = earth_radius_km * c;

    if distance.is_finite() {
        distance
    } else {
        f64::INFINITY
    }
}

/// 距离分 = max(0, base - penalty × km)
pub(super) fn distance_score(distance_km: f64, profile: &ScoringProfile) -> f64 {
    if !distance_km.is_finite() {
        return 0.0;
    }
    (profile.distance_base_score - profile.distance_penalty_per_km * distance_km).max(0.0)
}

/// 技能分: 具备 +bonus, 不足 -penalty
pub(super) fn skill_score(qualified: bool, profile: &ScoringProfile) -> f64 {
    if qualified {
        profile.qualified_bonus
    } else {
        -profile.skill_gap_penalty
    }
}

/// 评分分 = (rating / max_rating) × weight
pub(super) fn rating_score(rating: f64, profile: &ScoringProfile) -> f64 {
    (sanitize_rating(rating, profile.max_rating) / profile.max_rating) * profile.rating_weight
}

/// 空闲分: 空闲 +bonus, 忙碌 -penalty
pub(super) fn availability_score(busy: bool, profile: &ScoringProfile) -> f64 {
    if busy {
        -profile.busy_penalty
    } else {
        profile.available_bonus
    }
}

/// 非有限值按 0 处理, 其余截断到 [0, max_rating]
pub(super) fn sanitize_rating(rating: f64, max_rating: f64) -> f64 {
    if rating.is_finite() {
        rating.clamp(0.0, max_rating)
    } else {
        0.0
    }
}

/// 附近: 严格小于阈值 (恰好等于阈值不算)
pub(super) fn is_nearby(distance_km: f64, profile: &ScoringProfile) -> bool {
    distance_km < profile.nearby_threshold_km
}

/// 四舍五入到整数 (.5 向上取整, 负数同样向 +∞ 方向)
pub(super) fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
