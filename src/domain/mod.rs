// ==========================================
// Boss 轮换分配 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、静态目录
// 红线: 不含引擎逻辑,不含文件读写
// ==========================================

pub mod catalog;
pub mod inventory;
pub mod result;
pub mod types;

// 重导出核心类型
pub use catalog::{BossData, BOSS_CATALOG};
pub use inventory::{Inventory, Party, PartySlot};
pub use result::{
    AllocationResult, DutyMap, OptimizationResult, TradePlan, Transfer, WildcardUsageMap,
};
pub use types::{BossId, MaterialKey, WildcardPriority, MATERIAL_KEY_COUNT, PARTY_SLOTS};
