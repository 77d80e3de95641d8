// ==========================================
// 家具安装派工系统 - 订单实体
// ==========================================
// 对核心计算而言只提供任务位置, 其余字段透传
// ==========================================

use crate::domain::location::Location;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 订单行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sku: String,
    pub quantity: u32,
}

/// 时间窗口
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// 客户联系信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

// ==========================================
// Order - 订单快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer: Customer,
    pub address: Location,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub delivery_window: Option<TimeWindow>,
    #[serde(default)]
    pub service_fee: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Order {
    /// 订单总件数
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}
