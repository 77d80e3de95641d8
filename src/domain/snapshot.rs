// ==========================================
// 家具安装派工系统 - 调度快照
// ==========================================
// 调用方拥有的内存快照 (任务/装配工/订单)
// ==========================================

use crate::domain::assembler::Assembler;
use crate::domain::order::Order;
use crate::domain::task::AssemblyTask;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DispatchSnapshot {
    #[serde(default)]
    pub tasks: Vec<AssemblyTask>,
    #[serde(default)]
    pub assemblers: Vec<Assembler>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl DispatchSnapshot {
    pub fn task(&self, task_id: &str) -> Option<&AssemblyTask> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn assembler(&self, assembler_id: &str) -> Option<&Assembler> {
        self.assemblers.iter().find(|a| a.id == assembler_id)
    }

    pub fn order(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    /// 用新快照替换同 id 的任务, 不存在时追加
    pub fn upsert_task(&mut self, task: AssemblyTask) {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => *slot = task,
            None => self.tasks.push(task),
        }
    }

    /// 用新快照替换同 id 的装配工, 不存在时追加
    pub fn upsert_assembler(&mut self, assembler: Assembler) {
        match self.assemblers.iter_mut().find(|a| a.id == assembler.id) {
            Some(slot) => *slot = assembler,
            None => self.assemblers.push(assembler),
        }
    }
}
