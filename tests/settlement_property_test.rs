// ==========================================
// 交易结算性质测试
// ==========================================
// 测试目标: 对随机队伍验证结果不变量
// 覆盖范围: 守恒、非负、职责覆盖、Stygian 上限、幂等、输入只读
// 说明: 数量混合小值与接近 i64::MAX / u64::MAX 的大值
// ==========================================

use horadric_rota::domain::catalog::{self, BOSS_CATALOG};
use horadric_rota::domain::inventory::Inventory;
use horadric_rota::domain::types::{BossId, MaterialKey, WildcardPriority, PARTY_SLOTS};
use horadric_rota::engine::{
    apply_transfers, expected_holdings, verify_settlement, Allocator, RotaOptimizer,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Scenario {
    inventories: [Inventory; PARTY_SLOTS],
    active: [bool; PARTY_SLOTS],
    party_size: usize,
    priority: WildcardPriority,
}

impl Scenario {
    /// 是否有材料的激活合计超过 u64 (此时汇总池截断为 u64::MAX)
    fn pool_saturates(&self) -> bool {
        MaterialKey::ALL.iter().any(|key| {
            let total: u128 = self
                .inventories
                .iter()
                .zip(self.active.iter())
                .filter(|(_, a)| **a)
                .map(|(inv, _)| inv[*key] as u128)
                .sum();
            total > u64::MAX as u128
        })
    }
}

// ==========================================
// 生成器
// ==========================================

fn arb_quantity() -> impl Strategy<Value = u64> {
    prop_oneof![
        4 => Just(0u64),
        6 => 0u64..60,
        1 => (i64::MAX as u64 - 64)..=(i64::MAX as u64),
        1 => (u64::MAX - 64)..=u64::MAX,
    ]
}

fn arb_inventory() -> impl Strategy<Value = Inventory> {
    prop::array::uniform10(arb_quantity()).prop_map(|values| {
        let mut inventory = Inventory::empty();
        for (key, value) in MaterialKey::ALL.iter().zip(values) {
            inventory[*key] = value;
        }
        inventory
    })
}

fn arb_priority() -> impl Strategy<Value = WildcardPriority> {
    prop_oneof![
        Just(WildcardPriority::Balanced),
        prop::sample::select(BossId::ALL.to_vec()).prop_map(WildcardPriority::Boss),
    ]
}

fn arb_scenario() -> impl Strategy<Value = Scenario> {
    (
        prop::array::uniform4(arb_inventory()),
        prop::array::uniform4(any::<bool>()),
        arb_priority(),
    )
        .prop_map(|(inventories, active, priority)| Scenario {
            inventories,
            active,
            party_size: active.iter().filter(|a| **a).count(),
            priority,
        })
}

// ==========================================
// 性质
// ==========================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn settlement_always_consistent(s in arb_scenario()) {
        let result = RotaOptimizer::new().optimize(&s.inventories, s.priority, &s.active, s.party_size);
        let report = verify_settlement(&s.inventories, &s.active, &result);
        prop_assert!(report.is_consistent(), "violations {:?}", report.violations);
    }

    #[test]
    fn holdings_cover_expected_after_trades(s in arb_scenario()) {
        let result = RotaOptimizer::new().optimize(&s.inventories, s.priority, &s.active, s.party_size);
        let after = apply_transfers(&s.inventories, &result.trades);
        let expected = expected_holdings(&result);

        for slot in (0..PARTY_SLOTS).filter(|slot| s.active[*slot]) {
            for key in MaterialKey::ALL {
                prop_assert!(after[slot][key] >= expected[slot][key]);
            }
        }
    }

    #[test]
    fn trades_are_positive_and_between_active_members(s in arb_scenario()) {
        let result = RotaOptimizer::new().optimize(&s.inventories, s.priority, &s.active, s.party_size);
        for trade in &result.trades {
            prop_assert!(trade.amount > 0);
            prop_assert_ne!(trade.from_slot, trade.to_slot);
            prop_assert!(s.active[trade.from_slot]);
            prop_assert!(s.active[trade.to_slot]);
        }
    }

    #[test]
    fn wildcard_bounds(s in arb_scenario()) {
        let allocator = Allocator::new();
        let results = allocator.allocate(&s.inventories, s.priority, &s.active, s.party_size);
        let pool = allocator.pool(&s.inventories, &s.active);
        let party = s.party_size as u128;

        let total_wildcard: u128 = results.iter().map(|r| r.wildcard_used as u128).sum();
        prop_assert!(total_wildcard <= pool[MaterialKey::Stygian] as u128);

        for r in &results {
            let boss = catalog::find(r.boss_id);
            let funded = r.count as u128 * boss.cost as u128 * party;
            if !boss.is_wildcard_eligible {
                prop_assert_eq!(r.wildcard_used, 0);
            }
            prop_assert!(r.wildcard_used as u128 <= funded);
            // 专属材料 + Stygian 足以支付全部轮次
            prop_assert!(funded <= pool[boss.material_key] as u128 + r.wildcard_used as u128);
        }
    }

    #[test]
    fn per_slot_wildcard_usage_matches_allocation(s in arb_scenario()) {
        let result = RotaOptimizer::new().optimize(&s.inventories, s.priority, &s.active, s.party_size);
        let saturated = s.pool_saturates();

        for boss in BOSS_CATALOG.iter() {
            let per_slot: u128 = (0..PARTY_SLOTS)
                .map(|slot| result.wildcard_usage[slot].get(&boss.id).copied().unwrap_or(0) as u128)
                .sum();
            let allocated = result.allocation(boss.id).map(|r| r.wildcard_used).unwrap_or(0) as u128;
            if saturated {
                // 截断后的分配偏保守,实际缺口只会更少
                prop_assert!(per_slot <= allocated);
            } else {
                prop_assert_eq!(per_slot, allocated);
            }
        }
    }

    #[test]
    fn idempotent_and_input_untouched(s in arb_scenario()) {
        let optimizer = RotaOptimizer::new();
        let before = s.inventories;
        let first = optimizer.optimize(&s.inventories, s.priority, &s.active, s.party_size);
        let second = optimizer.optimize(&s.inventories, s.priority, &s.active, s.party_size);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(before, s.inventories);
        let summed = first
            .allocation_results
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.count));
        prop_assert_eq!(first.total_count, summed);
    }
}

// ==========================================
// 大数量边界
// ==========================================

#[test]
fn test_every_material_at_u64_max_stays_consistent() {
    let inventories = [Inventory::empty(); PARTY_SLOTS].map(|_| {
        let mut inventory = Inventory::empty();
        for key in MaterialKey::ALL {
            inventory[key] = u64::MAX;
        }
        inventory
    });
    let active = [true; PARTY_SLOTS];

    for priority in [WildcardPriority::Balanced, WildcardPriority::Boss(BossId::Duriel)] {
        let result = RotaOptimizer::new().optimize(&inventories, priority, &active, PARTY_SLOTS);
        let report = verify_settlement(&inventories, &active, &result);

        assert!(report.is_consistent(), "{:?}", report.violations);
        assert_eq!(result.count_of(BossId::Belial), u64::MAX / 8);
        assert!(result.trades.is_empty());
    }
}
