// ==========================================
// Boss 轮换分配 - 材料分配引擎
// ==========================================
// 职责: 汇总激活玩家材料,计算每个 Boss 的最大共同击杀次数
// 输入: 四个槽位背包 + Stygian 优先级 + 激活掩码 + 队伍人数
// 输出: 按目录顺序的 AllocationResult 列表
// ==========================================
// 红线: 一次击杀 = 每个激活玩家各消耗 cost 个材料
// 红线: 运行池仅为本次调用的局部变量
// ==========================================

use crate::domain::catalog::{self, BossData, BOSS_CATALOG};
use crate::domain::inventory::Inventory;
use crate::domain::result::AllocationResult;
use crate::domain::types::{MaterialKey, WildcardPriority, PARTY_SLOTS};
use tracing::{debug, instrument};

// ==========================================
// Allocator - 材料分配引擎
// ==========================================
pub struct Allocator {
    // 无状态引擎，不需要注入依赖
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new()
    }
}

impl Allocator {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算每个 Boss 的共同击杀次数
    ///
    /// 规则：
    /// 1) 只汇总激活槽位的材料
    /// 2) 普通 Boss: count = 汇总材料 / (cost * party_size)
    /// 3) Stygian Boss 第一阶段: 仅用专属材料,余数留给第二阶段
    /// 4) Stygian Boss 第二阶段: 按优先级顺序用 Stygian 补足轮次
    ///
    /// # 参数
    /// - `inventories`: 四个槽位背包 (只读)
    /// - `priority`: Stygian 优先级
    /// - `active`: 激活掩码
    /// - `party_size`: 激活人数 (由调用方保证与掩码一致)
    ///
    /// # 返回
    /// 按目录顺序的结果; party_size 为 0 时全部为 0
    #[instrument(skip(self, inventories, active, priority), fields(priority = %priority))]
    pub fn allocate(
        &self,
        inventories: &[Inventory; PARTY_SLOTS],
        priority: WildcardPriority,
        active: &[bool; PARTY_SLOTS],
        party_size: usize,
    ) -> Vec<AllocationResult> {
        let mut results: Vec<AllocationResult> = BOSS_CATALOG
            .iter()
            .map(|b| AllocationResult::zero(b.id))
            .collect();

        if party_size == 0 {
            debug!("无激活玩家,全部结果为 0");
            return results;
        }

        // 1. 汇总激活玩家材料
        let pool = self.pool(inventories, active);
        let party = party_size as u64;

        // 2. 普通 Boss (不可用 Stygian)
        for boss in catalog::standard() {
            let cost_per_rotation = boss.cost.saturating_mul(party);
            let rotations = pool[boss.material_key] / cost_per_rotation;
            results[boss.id as usize].count = rotations;
        }

        // 3. Stygian Boss 第一阶段: 仅用专属材料
        let mut specific_pools = [0u64; BOSS_CATALOG.len()];
        for boss in catalog::wildcard_eligible() {
            let cost_per_rotation = boss.cost.saturating_mul(party);
            let available = pool[boss.material_key];
            let rotations = available / cost_per_rotation;

            results[boss.id as usize].count = rotations;
            specific_pools[boss.id as usize] = available - rotations * cost_per_rotation;
        }

        // 4. Stygian Boss 第二阶段: Stygian 补足
        let mut remaining_wildcard = pool[MaterialKey::Stygian];
        for boss in self.wildcard_order(priority) {
            if remaining_wildcard == 0 {
                break;
            }

            let cost_per_rotation = boss.cost.saturating_mul(party);
            // 非优先 Boss 只能补足已有部分材料的轮次
            let may_open_with_wildcard =
                priority.is_balanced() || priority.target() == Some(boss.id);
            let result = &mut results[boss.id as usize];
            let remaining_specific = &mut specific_pools[boss.id as usize];

            while remaining_wildcard > 0 {
                let from_specific = (*remaining_specific).min(cost_per_rotation);
                let from_wildcard = cost_per_rotation - from_specific;

                if from_wildcard > remaining_wildcard {
                    break;
                }
                if from_specific == 0 && from_wildcard == 0 {
                    break;
                }
                if from_specific == 0 && !may_open_with_wildcard {
                    break;
                }

                // 纯 Stygian 轮次每轮相同,一次性提交
                let rotations = if from_specific == 0 {
                    remaining_wildcard / from_wildcard
                } else {
                    1
                };

                result.count += rotations;
                result.wildcard_used += from_wildcard * rotations;
                *remaining_specific -= from_specific * rotations;
                remaining_wildcard -= from_wildcard * rotations;

                debug!(
                    boss = %boss.id,
                    rotations,
                    from_specific,
                    from_wildcard,
                    remaining_wildcard,
                    "Stygian 补足轮次"
                );
            }
        }

        results
    }

    /// 汇总激活槽位的材料
    ///
    /// 未激活槽位即使有材料也不计入。
    pub fn pool(
        &self,
        inventories: &[Inventory; PARTY_SLOTS],
        active: &[bool; PARTY_SLOTS],
    ) -> Inventory {
        let mut pool = Inventory::empty();
        for (inv, _) in inventories.iter().zip(active.iter()).filter(|(_, a)| **a) {
            pool.add_all(inv);
        }
        pool
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 第二阶段的 Boss 处理顺序
    ///
    /// 优先 Boss 在前,其余按目录顺序; balanced 时全部按目录顺序。
    fn wildcard_order(&self, priority: WildcardPriority) -> Vec<&'static BossData> {
        let mut order: Vec<&'static BossData> = catalog::wildcard_eligible().collect();
        if let Some(target) = priority.target() {
            if let Some(pos) = order.iter().position(|b| b.id == target) {
                let first = order.remove(pos);
                order.insert(0, first);
            }
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::BossId;

    // ==========================================
    // 测试辅助函数
    // ==========================================

    fn solo(inv: Inventory) -> [Inventory; PARTY_SLOTS] {
        [inv, Inventory::empty(), Inventory::empty(), Inventory::empty()]
    }

    fn result_of(results: &[AllocationResult], id: BossId) -> AllocationResult {
        *results.iter().find(|r| r.boss_id == id).unwrap()
    }

    const ALL_ACTIVE: [bool; PARTY_SLOTS] = [true; PARTY_SLOTS];

    // ==========================================
    // 普通 Boss
    // ==========================================

    #[test]
    fn test_pure_specific_material() {
        let allocator = Allocator::new();
        let inventories = solo(Inventory::empty().with(MaterialKey::Husk, 8));

        let results = allocator.allocate(&inventories, WildcardPriority::default(), &ALL_ACTIVE, 4);

        let belial = result_of(&results, BossId::Belial);
        assert_eq!(belial.count, 1); // 8 / (2 * 4)
        assert_eq!(belial.wildcard_used, 0);
    }

    #[test]
    fn test_high_cost_boss() {
        let allocator = Allocator::new();
        let inventories = solo(Inventory::empty().with(MaterialKey::Mask, 48));

        let results = allocator.allocate(&inventories, WildcardPriority::default(), &ALL_ACTIVE, 4);

        assert_eq!(result_of(&results, BossId::Urivar).count, 1);
    }

    #[test]
    fn test_inactive_slot_is_not_pooled() {
        let allocator = Allocator::new();
        let inventories = [
            Inventory::empty().with(MaterialKey::Husk, 6),
            Inventory::empty().with(MaterialKey::Husk, 100),
            Inventory::empty(),
            Inventory::empty(),
        ];
        let active = [true, false, true, true];

        let results = allocator.allocate(&inventories, WildcardPriority::default(), &active, 3);

        assert_eq!(result_of(&results, BossId::Belial).count, 1); // 6 / (2 * 3)
        assert_eq!(allocator.pool(&inventories, &active)[MaterialKey::Husk], 6);
    }

    #[test]
    fn test_zero_party_size_yields_all_zero() {
        let allocator = Allocator::new();
        let inventories = [Inventory::empty().with(MaterialKey::Husk, 100); PARTY_SLOTS];

        let results =
            allocator.allocate(&inventories, WildcardPriority::default(), &[false; PARTY_SLOTS], 0);

        assert_eq!(results.len(), BOSS_CATALOG.len());
        assert!(results.iter().all(|r| r.count == 0 && r.wildcard_used == 0));
    }

    #[test]
    fn test_output_follows_catalog_order() {
        let allocator = Allocator::new();
        let results = allocator.allocate(
            &solo(Inventory::empty()),
            WildcardPriority::Boss(BossId::Harbinger),
            &ALL_ACTIVE,
            4,
        );
        let ids: Vec<BossId> = results.iter().map(|r| r.boss_id).collect();
        assert_eq!(ids, BossId::ALL.to_vec());
    }

    // ==========================================
    // Stygian 第二阶段
    // ==========================================

    #[test]
    fn test_priority_boss_funded_from_pure_wildcard() {
        let allocator = Allocator::new();
        let inventories = solo(Inventory::empty().with(MaterialKey::Stygian, 24));

        let results = allocator.allocate(
            &inventories,
            WildcardPriority::Boss(BossId::Duriel),
            &ALL_ACTIVE,
            4,
        );

        let duriel = result_of(&results, BossId::Duriel);
        assert_eq!(duriel.count, 2); // 24 / (3 * 4)
        assert_eq!(duriel.wildcard_used, 24);
        assert_eq!(result_of(&results, BossId::Andariel).count, 0);
        assert_eq!(result_of(&results, BossId::Harbinger).count, 0);
    }

    #[test]
    fn test_non_priority_boss_cannot_open_rotation_with_wildcard() {
        let allocator = Allocator::new();
        // 优先 Duriel 用掉 12 个后还剩 12 个,但 Andariel 没有专属材料
        let inventories = solo(Inventory::empty().with(MaterialKey::Stygian, 13));

        let results = allocator.allocate(
            &inventories,
            WildcardPriority::Boss(BossId::Duriel),
            &ALL_ACTIVE,
            4,
        );

        assert_eq!(result_of(&results, BossId::Duriel).count, 1);
        assert_eq!(result_of(&results, BossId::Andariel).count, 0);
        assert_eq!(result_of(&results, BossId::Harbinger).count, 0);
    }

    #[test]
    fn test_non_priority_boss_tops_up_partial_rotation() {
        let allocator = Allocator::new();
        // Andariel 余 2 个专属材料,差 10 个由 Stygian 补足
        let inventories = solo(
            Inventory::empty()
                .with(MaterialKey::Doll, 14)
                .with(MaterialKey::Stygian, 10),
        );

        let results = allocator.allocate(
            &inventories,
            WildcardPriority::Boss(BossId::Duriel),
            &ALL_ACTIVE,
            4,
        );

        let andariel = result_of(&results, BossId::Andariel);
        assert_eq!(andariel.count, 2);
        assert_eq!(andariel.wildcard_used, 10);
    }

    #[test]
    fn test_partial_top_up_does_not_reuse_specific_material() {
        let allocator = Allocator::new();
        // 余 2 个专属材料只能参与一次补足,之后是纯 Stygian 轮次
        let inventories = solo(
            Inventory::empty()
                .with(MaterialKey::Shard, 2)
                .with(MaterialKey::Stygian, 34),
        );

        let results = allocator.allocate(
            &inventories,
            WildcardPriority::Boss(BossId::Duriel),
            &ALL_ACTIVE,
            4,
        );

        let duriel = result_of(&results, BossId::Duriel);
        // 2 + 10 = 一轮; 剩余 24 = 两轮纯 Stygian
        assert_eq!(duriel.count, 3);
        assert_eq!(duriel.wildcard_used, 34);
    }

    #[test]
    fn test_balanced_processes_in_catalog_order() {
        let allocator = Allocator::new();
        let inventories = solo(Inventory::empty().with(MaterialKey::Stygian, 12));

        let results =
            allocator.allocate(&inventories, WildcardPriority::Balanced, &ALL_ACTIVE, 4);

        // Harbinger 在目录中最先,独占全部 Stygian
        assert_eq!(result_of(&results, BossId::Harbinger).count, 1);
        assert_eq!(result_of(&results, BossId::Andariel).count, 0);
        assert_eq!(result_of(&results, BossId::Duriel).count, 0);
    }

    #[test]
    fn test_priority_on_non_eligible_boss_only_tops_up() {
        let allocator = Allocator::new();
        let inventories = solo(
            Inventory::empty()
                .with(MaterialKey::Doll, 1)
                .with(MaterialKey::Stygian, 40),
        );

        let results = allocator.allocate(
            &inventories,
            WildcardPriority::Boss(BossId::Belial),
            &ALL_ACTIVE,
            4,
        );

        assert_eq!(result_of(&results, BossId::Andariel).count, 1);
        assert_eq!(result_of(&results, BossId::Andariel).wildcard_used, 11);
        assert_eq!(result_of(&results, BossId::Harbinger).count, 0);
        assert_eq!(result_of(&results, BossId::Belial).wildcard_used, 0);
    }

    #[test]
    fn test_large_quantity_scaling() {
        let allocator = Allocator::new();
        let inventories = solo(Inventory::empty().with(MaterialKey::Husk, 1000));
        let active = [true, false, false, false];

        let results = allocator.allocate(&inventories, WildcardPriority::default(), &active, 1);

        assert_eq!(result_of(&results, BossId::Belial).count, 500);
    }

    #[test]
    fn test_huge_wildcard_stock_is_fast() {
        let allocator = Allocator::new();
        let inventories = solo(Inventory::empty().with(MaterialKey::Stygian, 12_000_000_000));

        let results = allocator.allocate(
            &inventories,
            WildcardPriority::Boss(BossId::Andariel),
            &ALL_ACTIVE,
            4,
        );

        assert_eq!(result_of(&results, BossId::Andariel).count, 1_000_000_000);
    }

    #[test]
    fn test_allocate_is_deterministic() {
        let allocator = Allocator::new();
        let inventories = [
            Inventory::empty().with(MaterialKey::Shard, 7).with(MaterialKey::Stygian, 9),
            Inventory::empty().with(MaterialKey::Doll, 5),
            Inventory::empty().with(MaterialKey::Abhorrent, 11).with(MaterialKey::Husk, 30),
            Inventory::empty().with(MaterialKey::Stygian, 20),
        ];
        let priority = WildcardPriority::Boss(BossId::Andariel);

        let first = allocator.allocate(&inventories, priority, &ALL_ACTIVE, 4);
        let second = allocator.allocate(&inventories, priority, &ALL_ACTIVE, 4);
        assert_eq!(first, second);
    }
}
