// ==========================================
// Boss 轮换分配 - 交易结算校验
// ==========================================
// 职责: 模拟执行交易,给出交易后各玩家应持有的材料,并校验结果一致性
// 校验项: 材料守恒、只在激活玩家间交易、职责覆盖、Stygian 覆盖
// ==========================================

use crate::domain::catalog;
use crate::domain::inventory::Inventory;
use crate::domain::result::{OptimizationResult, Transfer};
use crate::domain::types::{MaterialKey, PARTY_SLOTS};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 违规类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationKind {
    NonPositiveAmount,  // 交易数量为 0
    InactiveParticipant, // 交易涉及未激活玩家
    Overdraw,           // 交易超出来源玩家持有量
    Conservation,       // 材料总量变化
    DutyCoverage,       // 专属材料 + Stygian 责任不等于职责消耗
    WildcardShortage,   // 交易后 Stygian 不足
    WildcardCap,        // Boss 的 Stygian 用量超过理论上限
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ViolationKind::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
            ViolationKind::InactiveParticipant => "INACTIVE_PARTICIPANT",
            ViolationKind::Overdraw => "OVERDRAW",
            ViolationKind::Conservation => "CONSERVATION",
            ViolationKind::DutyCoverage => "DUTY_COVERAGE",
            ViolationKind::WildcardShortage => "WILDCARD_SHORTAGE",
            ViolationKind::WildcardCap => "WILDCARD_CAP",
        };
        write!(f, "{}", s)
    }
}

/// 单条违规记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementViolation {
    pub kind: ViolationKind,
    pub slot: Option<usize>,
    pub reason: String,
}

/// 结算校验报告
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SettlementReport {
    /// 交易后的持有量
    pub holdings_after: [Inventory; PARTY_SLOTS],
    pub violations: Vec<SettlementViolation>,
}

impl SettlementReport {
    pub fn is_consistent(&self) -> bool {
        self.violations.is_empty()
    }
}

// ==========================================
// 交易模拟
// ==========================================

/// 对原始背包依次执行交易,返回新副本
///
/// 来源不足时按 0 截断 (是否超支由 verify_settlement 报告)。
pub fn apply_transfers(
    inventories: &[Inventory; PARTY_SLOTS],
    trades: &[Transfer],
) -> [Inventory; PARTY_SLOTS] {
    let mut holdings = *inventories;
    for trade in trades {
        if trade.from_slot >= PARTY_SLOTS || trade.to_slot >= PARTY_SLOTS {
            continue;
        }
        let moved = holdings[trade.from_slot][trade.material].min(trade.amount);
        holdings[trade.from_slot][trade.material] -= moved;
        holdings[trade.to_slot][trade.material] =
            holdings[trade.to_slot][trade.material].saturating_add(moved);
    }
    holdings
}

/// 交易完成后每个玩家用于职责的材料
///
/// 专属材料 = 职责消耗 - Stygian 责任; Stygian = 各 Boss 责任合计。
pub fn expected_holdings(result: &OptimizationResult) -> [Inventory; PARTY_SLOTS] {
    let mut expected = [Inventory::empty(); PARTY_SLOTS];
    for slot in 0..PARTY_SLOTS {
        for (boss_id, duty) in &result.duties[slot] {
            let boss = catalog::find(*boss_id);
            let cost_total = duty.saturating_mul(boss.cost);
            let wildcard = result.wildcard_usage[slot].get(boss_id).copied().unwrap_or(0);

            expected[slot][boss.material_key] = expected[slot][boss.material_key]
                .saturating_add(cost_total.saturating_sub(wildcard));
            expected[slot][MaterialKey::Stygian] =
                expected[slot][MaterialKey::Stygian].saturating_add(wildcard);
        }
    }
    expected
}

// ==========================================
// 一致性校验
// ==========================================

/// 校验一次计算结果
///
/// # 参数
/// - `inventories`: 计算时使用的原始背包
/// - `active`: 计算时使用的激活掩码
/// - `result`: 计算结果
pub fn verify_settlement(
    inventories: &[Inventory; PARTY_SLOTS],
    active: &[bool; PARTY_SLOTS],
    result: &OptimizationResult,
) -> SettlementReport {
    let mut violations = Vec::new();

    // 1. 交易本身
    let mut running = *inventories;
    for trade in &result.trades {
        if trade.amount == 0 {
            violations.push(SettlementViolation {
                kind: ViolationKind::NonPositiveAmount,
                slot: Some(trade.from_slot),
                reason: format!("{} -> {} {} 数量为 0", trade.from_slot, trade.to_slot, trade.material),
            });
        }
        for slot in [trade.from_slot, trade.to_slot] {
            if slot >= PARTY_SLOTS || !active[slot] {
                violations.push(SettlementViolation {
                    kind: ViolationKind::InactiveParticipant,
                    slot: Some(slot),
                    reason: format!("交易涉及未激活槽位 {}", slot),
                });
            }
        }
        if trade.from_slot < PARTY_SLOTS && trade.to_slot < PARTY_SLOTS {
            let has = running[trade.from_slot][trade.material];
            if has < trade.amount {
                violations.push(SettlementViolation {
                    kind: ViolationKind::Overdraw,
                    slot: Some(trade.from_slot),
                    reason: format!(
                        "槽位 {} 持有 {} 个 {},需送出 {}",
                        trade.from_slot, has, trade.material, trade.amount
                    ),
                });
            }
            running = apply_transfers(&running, std::slice::from_ref(trade));
        }
    }
    let holdings_after = running;

    // 2. 材料守恒 (u128 合计,四个槽位的 u64 之和不会溢出)
    for key in MaterialKey::ALL {
        let before: u128 = inventories.iter().map(|inv| inv[key] as u128).sum();
        let after: u128 = holdings_after.iter().map(|inv| inv[key] as u128).sum();
        if before != after {
            violations.push(SettlementViolation {
                kind: ViolationKind::Conservation,
                slot: None,
                reason: format!("{} 总量 {} -> {}", key, before, after),
            });
        }
    }

    // 3. 职责覆盖与 Stygian 覆盖
    for slot in (0..PARTY_SLOTS).filter(|s| active[*s]) {
        let mut wildcard_need = 0u64;
        for (boss_id, duty) in &result.duties[slot] {
            let boss = catalog::find(*boss_id);
            let cost_total = duty.saturating_mul(boss.cost);
            let wildcard = result.wildcard_usage[slot].get(boss_id).copied().unwrap_or(0);
            let specific = holdings_after[slot][boss.material_key].min(cost_total);
            wildcard_need = wildcard_need.saturating_add(wildcard);

            if specific.saturating_add(wildcard) != cost_total {
                violations.push(SettlementViolation {
                    kind: ViolationKind::DutyCoverage,
                    slot: Some(slot),
                    reason: format!(
                        "{}: 专属 {} + Stygian {} != {}",
                        boss_id, specific, wildcard, cost_total
                    ),
                });
            }
        }

        let has_wildcard = holdings_after[slot][MaterialKey::Stygian];
        if has_wildcard < wildcard_need {
            violations.push(SettlementViolation {
                kind: ViolationKind::WildcardShortage,
                slot: Some(slot),
                reason: format!("Stygian 持有 {},需要 {}", has_wildcard, wildcard_need),
            });
        }
    }

    // 4. Boss 级 Stygian 上限 (全队合计)
    for allocation in &result.allocation_results {
        let boss = catalog::find(allocation.boss_id);
        let cap = allocation
            .count
            .saturating_mul(boss.cost)
            .saturating_mul(result.party_size as u64);
        if allocation.wildcard_used > cap {
            violations.push(SettlementViolation {
                kind: ViolationKind::WildcardCap,
                slot: None,
                reason: format!(
                    "{}: Stygian {} 超过上限 {}",
                    allocation.boss_id, allocation.wildcard_used, cap
                ),
            });
        }
    }

    SettlementReport {
        holdings_after,
        violations,
    }
}
