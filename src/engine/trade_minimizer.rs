// ==========================================
// Boss 轮换分配 - 交易最少化引擎
// ==========================================
// 职责: 根据分配结果计算玩家之间的材料交易
// 输入: 原始四槽位背包 + AllocationResult + 激活掩码 + 队伍人数
// 输出: TradePlan (交易列表 + 职责表 + Stygian 使用表)
// ==========================================
// 红线: 调用方背包只读,交易模拟只作用于内部副本
// 红线: 先结算专属材料,剩余缺口才由 Stygian 承担
// ==========================================

use crate::domain::catalog;
use crate::domain::inventory::Inventory;
use crate::domain::result::{AllocationResult, TradePlan, Transfer};
use crate::domain::types::{MaterialKey, PARTY_SLOTS};
use tracing::{debug, instrument};

/// 单个玩家的盈余或缺口
#[derive(Debug, Clone, Copy)]
struct Balance {
    slot: usize,
    amount: u64,
}

// ==========================================
// TradeMinimizer - 交易最少化引擎
// ==========================================
pub struct TradeMinimizer {
    // 无状态引擎，不需要注入依赖
}

impl Default for TradeMinimizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TradeMinimizer {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算交易计划
    ///
    /// 规则：
    /// 1) 每个激活玩家对每个 count > 0 的 Boss 负责全部 count 次击杀
    /// 2) 第一轮: 专属材料从盈余玩家流向缺口玩家 (槽位顺序,先到先得)
    /// 3) 第二轮: 剩余缺口记为 Stygian 责任,按玩家合计后同样结算
    /// 4) 合并相同 (来源, 目标, 材料) 的交易,去掉 0 数量
    ///
    /// # 参数
    /// 必须与生成 allocation_results 时的 active / party_size 一致 (此处不校验)
    #[instrument(skip_all, fields(party_size = party_size))]
    pub fn minimize_trades(
        &self,
        inventories: &[Inventory; PARTY_SLOTS],
        allocation_results: &[AllocationResult],
        active: &[bool; PARTY_SLOTS],
        party_size: usize,
    ) -> TradePlan {
        let mut plan = TradePlan::empty();
        if party_size == 0 {
            return plan;
        }

        // 交易模拟使用副本
        let mut working: [Inventory; PARTY_SLOTS] = *inventories;
        let mut trades: Vec<Transfer> = Vec::new();

        // ==========================================
        // 第一轮: 专属材料结算
        // ==========================================
        for result in allocation_results.iter().filter(|r| r.count > 0) {
            let boss = catalog::find(result.boss_id);
            let duty = result.count;
            let required = duty.saturating_mul(boss.cost);

            let mut surplus = Vec::new();
            let mut deficit = Vec::new();
            for slot in active_slots(active) {
                plan.duties[slot].insert(boss.id, duty);

                let has = working[slot][boss.material_key];
                if has > required {
                    surplus.push(Balance { slot, amount: has - required });
                } else if has < required {
                    deficit.push(Balance { slot, amount: required - has });
                }
            }

            let unmet = settle(
                boss.material_key,
                &mut surplus,
                &deficit,
                &mut working,
                &mut trades,
            );
            if unmet > 0 {
                debug!(boss = %boss.id, unmet, "专属材料不足部分由 Stygian 承担");
            }
        }

        // ==========================================
        // 第二轮: Stygian 结算
        // ==========================================
        let mut wildcard_need = [0u64; PARTY_SLOTS];
        for slot in active_slots(active) {
            for result in allocation_results {
                let duty = plan.duties[slot].get(&result.boss_id).copied().unwrap_or(0);
                if duty == 0 {
                    continue;
                }

                let boss = catalog::find(result.boss_id);
                let cost_total = duty.saturating_mul(boss.cost);
                let has_specific = working[slot][boss.material_key];
                if has_specific < cost_total {
                    let gap = cost_total - has_specific;
                    wildcard_need[slot] = wildcard_need[slot].saturating_add(gap);
                    plan.wildcard_usage[slot].insert(boss.id, gap);
                }
            }
        }

        let mut surplus = Vec::new();
        let mut deficit = Vec::new();
        for slot in active_slots(active) {
            let has = working[slot][MaterialKey::Stygian];
            let need = wildcard_need[slot];
            if has > need {
                surplus.push(Balance { slot, amount: has - need });
            } else if has < need {
                deficit.push(Balance { slot, amount: need - has });
            }
        }
        let unmet = settle(
            MaterialKey::Stygian,
            &mut surplus,
            &deficit,
            &mut working,
            &mut trades,
        );
        if unmet > 0 {
            // 分配结果与背包不一致时才会出现
            debug!(unmet, "Stygian 缺口未能完全结算");
        }

        plan.trades = consolidate(trades);
        debug!(trade_count = plan.trades.len(), "交易计划完成");
        plan
    }
}

// ==========================================
// 辅助函数
// ==========================================

fn active_slots(active: &[bool; PARTY_SLOTS]) -> impl Iterator<Item = usize> + '_ {
    (0..PARTY_SLOTS).filter(move |slot| active[*slot])
}

/// 先到先得: 按顺序用盈余填补每个缺口
///
/// # 返回
/// 未能填补的缺口总量
fn settle(
    material: MaterialKey,
    surplus: &mut [Balance],
    deficit: &[Balance],
    working: &mut [Inventory; PARTY_SLOTS],
    trades: &mut Vec<Transfer>,
) -> u64 {
    let mut unmet = 0u64;

    for want in deficit {
        let mut needed = want.amount;

        for give in surplus.iter_mut() {
            if needed == 0 {
                break;
            }
            if give.amount == 0 {
                continue;
            }

            let amount = give.amount.min(needed);
            trades.push(Transfer {
                from_slot: give.slot,
                to_slot: want.slot,
                material,
                amount,
            });

            give.amount -= amount;
            working[give.slot][material] -= amount;
            working[want.slot][material] += amount;
            needed -= amount;
        }

        unmet += needed;
    }

    unmet
}

/// 合并相同 (来源, 目标, 材料) 的交易,保持首次出现顺序
fn consolidate(trades: Vec<Transfer>) -> Vec<Transfer> {
    let mut merged: Vec<Transfer> = Vec::with_capacity(trades.len());
    for trade in trades {
        match merged.iter_mut().find(|t| {
            t.from_slot == trade.from_slot && t.to_slot == trade.to_slot && t.material == trade.material
        }) {
            Some(existing) => existing.amount += trade.amount,
            None => merged.push(trade),
        }
    }
    merged.retain(|t| t.amount > 0);
    merged
}
