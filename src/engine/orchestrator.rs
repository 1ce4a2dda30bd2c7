// ==========================================
// Boss 轮换分配 - 计算编排器
// ==========================================
// 职责: 串联分配引擎与交易最少化引擎,产出完整结果
// 流程: Allocator -> TradeMinimizer -> 汇总 total_count
// ==========================================

use crate::domain::inventory::Inventory;
use crate::domain::result::OptimizationResult;
use crate::domain::types::{WildcardPriority, PARTY_SLOTS};
use crate::engine::allocator::Allocator;
use crate::engine::trade_minimizer::TradeMinimizer;
use tracing::{info, instrument};

// ==========================================
// RotaOptimizer - 编排器
// ==========================================
pub struct RotaOptimizer {
    allocator: Allocator,
    trade_minimizer: TradeMinimizer,
}

impl Default for RotaOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

impl RotaOptimizer {
    pub fn new() -> Self {
        Self {
            allocator: Allocator::new(),
            trade_minimizer: TradeMinimizer::new(),
        }
    }

    /// 执行一次完整计算
    ///
    /// # 参数
    /// - `inventories`: 四个槽位背包 (只读)
    /// - `priority`: Stygian 优先级
    /// - `active`: 激活掩码
    /// - `party_size`: 激活人数
    ///
    /// # 返回
    /// 分配结果 + 交易 + 职责 + Stygian 使用表
    #[instrument(skip(self, inventories, active, priority), fields(priority = %priority))]
    pub fn optimize(
        &self,
        inventories: &[Inventory; PARTY_SLOTS],
        priority: WildcardPriority,
        active: &[bool; PARTY_SLOTS],
        party_size: usize,
    ) -> OptimizationResult {
        let allocation_results = self
            .allocator
            .allocate(inventories, priority, active, party_size);

        let plan = self.trade_minimizer.minimize_trades(
            inventories,
            &allocation_results,
            active,
            party_size,
        );

        let total_count = allocation_results
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.count));

        info!(
            total_count,
            trade_count = plan.trades.len(),
            "轮换计算完成"
        );

        OptimizationResult {
            allocation_results,
            total_count,
            trades: plan.trades,
            duties: plan.duties,
            wildcard_usage: plan.wildcard_usage,
            party_size,
        }
    }
}
