// ==========================================
// Boss 轮换分配 - 计算结果
// ==========================================
// 职责: 分配结果、交易、职责表、Stygian 使用表
// 红线: 每次调用新建,不在调用之间保留
// ==========================================

use crate::domain::types::{BossId, MaterialKey, PARTY_SLOTS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 每槽位: Boss -> 数量
pub type PerBoss = BTreeMap<BossId, u64>;

/// 槽位 -> Boss -> 需负责的击杀次数
pub type DutyMap = [PerBoss; PARTY_SLOTS];

/// 槽位 -> Boss -> 需用 Stygian 补足的数量
pub type WildcardUsageMap = [PerBoss; PARTY_SLOTS];

/// 空的按槽位表
pub fn empty_slot_map() -> [PerBoss; PARTY_SLOTS] {
    Default::default()
}

// ==========================================
// AllocationResult - 单个 Boss 的分配结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub boss_id: BossId,
    pub count: u64,         // 队伍可共同击杀次数
    pub wildcard_used: u64, // 全队合计消耗的 Stygian
}

impl AllocationResult {
    pub fn zero(boss_id: BossId) -> Self {
        Self {
            boss_id,
            count: 0,
            wildcard_used: 0,
        }
    }
}

// ==========================================
// Transfer - 点对点交易
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from_slot: usize,
    pub to_slot: usize,
    pub material: MaterialKey,
    pub amount: u64,
}

// ==========================================
// TradePlan - 交易最少化输出
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradePlan {
    pub trades: Vec<Transfer>,
    pub duties: DutyMap,
    pub wildcard_usage: WildcardUsageMap,
}

impl TradePlan {
    pub fn empty() -> Self {
        Self {
            trades: Vec::new(),
            duties: empty_slot_map(),
            wildcard_usage: empty_slot_map(),
        }
    }
}

// ==========================================
// OptimizationResult - 完整结果 (分配 + 交易)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub allocation_results: Vec<AllocationResult>,
    pub total_count: u64,
    pub trades: Vec<Transfer>,
    pub duties: DutyMap,
    pub wildcard_usage: WildcardUsageMap,
    pub party_size: usize,
}

impl OptimizationResult {
    /// 查询某 Boss 的分配结果
    pub fn allocation(&self, boss_id: BossId) -> Option<&AllocationResult> {
        self.allocation_results.iter().find(|r| r.boss_id == boss_id)
    }

    /// 某 Boss 的击杀次数 (不存在时为 0)
    pub fn count_of(&self, boss_id: BossId) -> u64 {
        self.allocation(boss_id).map(|r| r.count).unwrap_or(0)
    }

    /// 某槽位合计需要的 Stygian
    pub fn wildcard_need_of(&self, slot: usize) -> u64 {
        self.wildcard_usage
            .get(slot)
            .map(|m| m.values().fold(0u64, |acc, v| acc.saturating_add(*v)))
            .unwrap_or(0)
    }

    /// 是否无需交易
    pub fn is_trade_free(&self) -> bool {
        self.trades.is_empty()
    }
}
