// ==========================================
// Boss 轮换分配 - Boss 目录
// ==========================================
// 职责: 静态 Boss 目录 (材料、单人消耗、是否可用 Stygian)
// 红线: 运行期不可修改,输出顺序以本目录为准
// ==========================================

use crate::domain::types::{BossId, MaterialKey};
use serde::Serialize;

// ==========================================
// BossData - 目录条目
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BossData {
    pub id: BossId,
    pub material_key: MaterialKey, // 专属材料 (永不为 Stygian)
    pub cost: u64,                 // 每人每次击杀消耗
    pub is_wildcard_eligible: bool, // 可用 Stygian 替代
}

/// Boss 目录 (顺序固定)
pub static BOSS_CATALOG: [BossData; 9] = [
    BossData {
        id: BossId::Belial,
        material_key: MaterialKey::Husk,
        cost: 2,
        is_wildcard_eligible: false,
    },
    BossData {
        id: BossId::Harbinger,
        material_key: MaterialKey::Abhorrent,
        cost: 3,
        is_wildcard_eligible: true,
    },
    BossData {
        id: BossId::Andariel,
        material_key: MaterialKey::Doll,
        cost: 3,
        is_wildcard_eligible: true,
    },
    BossData {
        id: BossId::Duriel,
        material_key: MaterialKey::Shard,
        cost: 3,
        is_wildcard_eligible: true,
    },
    BossData {
        id: BossId::Urivar,
        material_key: MaterialKey::Mask,
        cost: 12,
        is_wildcard_eligible: false,
    },
    BossData {
        id: BossId::Zir,
        material_key: MaterialKey::Blood,
        cost: 12,
        is_wildcard_eligible: false,
    },
    BossData {
        id: BossId::Beast,
        material_key: MaterialKey::Fear,
        cost: 12,
        is_wildcard_eligible: false,
    },
    BossData {
        id: BossId::Grigoire,
        material_key: MaterialKey::Steel,
        cost: 12,
        is_wildcard_eligible: false,
    },
    BossData {
        id: BossId::Varshan,
        material_key: MaterialKey::Heart,
        cost: 12,
        is_wildcard_eligible: false,
    },
];

/// 按 id 查目录条目
pub fn find(id: BossId) -> &'static BossData {
    // BossId 与目录一一对应且顺序一致
    &BOSS_CATALOG[id as usize]
}

/// 可用 Stygian 的 Boss (目录顺序)
pub fn wildcard_eligible() -> impl Iterator<Item = &'static BossData> {
    BOSS_CATALOG.iter().filter(|b| b.is_wildcard_eligible)
}

/// 不可用 Stygian 的 Boss (目录顺序)
pub fn standard() -> impl Iterator<Item = &'static BossData> {
    BOSS_CATALOG.iter().filter(|b| !b.is_wildcard_eligible)
}

/// 去重后的专属材料列表 (目录顺序)
///
/// 多个 Boss 可能共享同一种材料,展示材料网格时只列一次。
pub fn unique_materials() -> Vec<MaterialKey> {
    let mut keys: Vec<MaterialKey> = Vec::with_capacity(BOSS_CATALOG.len());
    for boss in BOSS_CATALOG.iter() {
        if !keys.contains(&boss.material_key) {
            keys.push(boss.material_key);
        }
    }
    keys
}
