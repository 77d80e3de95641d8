// ==========================================
// 家具安装派工系统 - 装配工实体
// ==========================================
// 不变量: status == AVAILABLE ⇔ active_task_id 为空
// 说明: 实体只读快照, 由外部持久层拥有和修改
// ==========================================

use crate::domain::location::Location;
use crate::domain::types::{AssemblerStatus, SkillLevel};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ==========================================
// Assembler - 装配工快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assembler {
    pub id: String,
    pub name: String,

    /// 具备的技能等级 (缺失/null/非数组时视为无技能, 未知等级忽略)
    #[serde(default, deserialize_with = "lenient_skills")]
    pub skills: Vec<SkillLevel>,

    /// 评分 [0, 5] (缺失/非数字按 0)
    #[serde(default, deserialize_with = "lenient_rating")]
    pub rating: f64,

    pub current_location: Location,

    #[serde(default)]
    pub status: AssemblerStatus,

    /// 当前占用的任务
    #[serde(default)]
    pub active_task_id: Option<String>,
}

impl Assembler {
    /// 最高技能等级
    ///
    /// 技能为空时返回 None, 调用方应将其视为不具备任何等级
    pub fn max_skill(&self) -> Option<SkillLevel> {
        self.skills.iter().copied().max()
    }

    /// 是否具备 `required` 等级 (高等级覆盖低等级)
    pub fn is_qualified_for(&self, required: SkillLevel) -> bool {
        self.max_skill()
            .map(|max| max.covers(required))
            .unwrap_or(false)
    }

    /// 是否有正在占用的任务
    pub fn is_busy(&self) -> bool {
        self.active_task_id.is_some()
    }
}

// ==========================================
// 宽松反序列化: 上游数据残缺不应导致整个快照无法解析
// ==========================================

fn lenient_skills<'de, D>(deserializer: D) -> Result<Vec<SkillLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    let skills = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    };
    Ok(skills)
}

fn lenient_rating<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64().unwrap_or(0.0))
}
