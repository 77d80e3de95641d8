// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

#![allow(dead_code)]

use assembly_dispatch::domain::{
    Assembler, AssemblerStatus, AssemblyTask, Customer, Item, Location, Order, SkillLevel,
    TaskStatus,
};
use chrono::{DateTime, TimeZone, Utc};
use std::f64::consts::PI;

/// 奥克兰 CBD (测试用任务位置)
pub const CBD: (f64, f64) = (-36.8485, 174.7633);

/// 固定时间, 保证断言稳定
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 25, 9, 0, 0).unwrap()
}

/// 沿经线向北偏移 `km` 公里 (haversine 沿经线为精确值)
pub fn km_north_of_cbd(km: f64) -> Location {
    let deg_per_km = 180.0 / (PI * 6371.0);
    Location::new(CBD.0 + km * deg_per_km, CBD.1, format!("{}km north of CBD", km))
}

// ==========================================
// Assembler 构建器
// ==========================================

pub struct AssemblerBuilder {
    id: String,
    name: String,
    skills: Vec<SkillLevel>,
    rating: f64,
    location: Location,
    status: AssemblerStatus,
    active_task_id: Option<String>,
}

impl AssemblerBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: format!("Assembler {}", id),
            skills: vec![SkillLevel::Easy],
            rating: 4.0,
            location: km_north_of_cbd(0.0),
            status: AssemblerStatus::Available,
            active_task_id: None,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn skills(mut self, skills: &[SkillLevel]) -> Self {
        self.skills = skills.to_vec();
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn km_from_cbd(mut self, km: f64) -> Self {
        self.location = km_north_of_cbd(km);
        self
    }

    pub fn location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// 设置为非空闲状态并持有任务
    pub fn busy_with(mut self, status: AssemblerStatus, task_id: &str) -> Self {
        self.status = status;
        self.active_task_id = Some(task_id.to_string());
        self
    }

    /// 直接设置状态和任务 (可构造不一致的数据)
    pub fn raw_state(mut self, status: AssemblerStatus, active_task_id: Option<&str>) -> Self {
        self.status = status;
        self.active_task_id = active_task_id.map(|s| s.to_string());
        self
    }

    pub fn build(self) -> Assembler {
        Assembler {
            id: self.id,
            name: self.name,
            skills: self.skills,
            rating: self.rating,
            current_location: self.location,
            status: self.status,
            active_task_id: self.active_task_id,
        }
    }
}

// ==========================================
// AssemblyTask 构建器
// ==========================================

pub struct TaskBuilder {
    id: String,
    order_id: String,
    status: TaskStatus,
    required_skill: SkillLevel,
    assigned: Vec<String>,
}

impl TaskBuilder {
    pub fn new(id: &str, order_id: &str) -> Self {
        Self {
            id: id.to_string(),
            order_id: order_id.to_string(),
            status: TaskStatus::Open,
            required_skill: SkillLevel::Medium,
            assigned: Vec::new(),
        }
    }

    pub fn requires(mut self, skill: SkillLevel) -> Self {
        self.required_skill = skill;
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn assigned_to(mut self, ids: &[&str]) -> Self {
        self.assigned = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn build(self) -> AssemblyTask {
        AssemblyTask {
            id: self.id,
            order_id: self.order_id,
            status: self.status,
            required_skill: self.required_skill,
            estimated_duration_minutes: 90,
            assigned_assembler_ids: self.assigned,
            scheduled_time: None,
            history: Vec::new(),
        }
    }
}

// ==========================================
// Order 构建器
// ==========================================

pub struct OrderBuilder {
    id: String,
    customer_name: String,
    address: Location,
    items: Vec<Item>,
}

impl OrderBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            customer_name: "Alice Johnson".to_string(),
            address: Location::new(CBD.0, CBD.1, "123 Queen St, Auckland CBD"),
            items: Vec::new(),
        }
    }

    pub fn customer(mut self, name: &str) -> Self {
        self.customer_name = name.to_string();
        self
    }

    pub fn address(mut self, location: Location) -> Self {
        self.address = location;
        self
    }

    pub fn item(mut self, name: &str, quantity: u32) -> Self {
        let id = format!("i{}", self.items.len() + 1);
        self.items.push(Item {
            id,
            name: name.to_string(),
            sku: String::new(),
            quantity,
        });
        self
    }

    pub fn build(self) -> Order {
        Order {
            id: self.id,
            customer: Customer {
                name: self.customer_name,
                ..Customer::default()
            },
            address: self.address,
            items: self.items,
            delivery_window: None,
            service_fee: 0.0,
            notes: None,
        }
    }
}
