// ==========================================
// Boss 轮换分配 - 背包与队伍
// ==========================================
// 职责: 每个槽位的材料背包、队伍槽位与激活状态
// 红线: 所有材料键始终存在且非负 (固定数组,不用 HashMap)
// ==========================================

use crate::domain::types::{MaterialKey, MATERIAL_KEY_COUNT, PARTY_SLOTS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::{Index, IndexMut};

// ==========================================
// Inventory - 单人背包
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Inventory {
    counts: [u64; MATERIAL_KEY_COUNT],
}

impl Inventory {
    /// 空背包 (全部为 0)
    pub fn empty() -> Self {
        Self::default()
    }

    /// 链式设置单个材料数量
    pub fn with(mut self, key: MaterialKey, amount: u64) -> Self {
        self[key] = amount;
        self
    }

    /// 从外部有符号输入构造,负数截断为 0
    pub fn from_signed(values: &[(MaterialKey, i64)]) -> Self {
        let mut inv = Self::empty();
        for (key, value) in values {
            inv.set_clamped(*key, *value);
        }
        inv
    }

    /// 设置数量,负数截断为 0
    ///
    /// # 返回
    /// - `true`: 输入被截断
    pub fn set_clamped(&mut self, key: MaterialKey, value: i64) -> bool {
        self[key] = value.max(0) as u64;
        value < 0
    }

    pub fn get(&self, key: MaterialKey) -> u64 {
        self.counts[key.index()]
    }

    /// 是否全部为 0
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|v| *v == 0)
    }

    /// 所有材料总数
    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0u64, |acc, v| acc.saturating_add(*v))
    }

    /// (材料, 数量) 迭代,按 MaterialKey::ALL 顺序
    pub fn iter(&self) -> impl Iterator<Item = (MaterialKey, u64)> + '_ {
        MaterialKey::ALL.iter().map(move |k| (*k, self.counts[k.index()]))
    }

    /// 累加另一个背包 (饱和加法)
    pub fn add_all(&mut self, other: &Inventory) {
        for key in MaterialKey::ALL {
            self[key] = self[key].saturating_add(other[key]);
        }
    }
}

impl Index<MaterialKey> for Inventory {
    type Output = u64;

    fn index(&self, key: MaterialKey) -> &u64 {
        &self.counts[key.index()]
    }
}

impl IndexMut<MaterialKey> for Inventory {
    fn index_mut(&mut self, key: MaterialKey) -> &mut u64 {
        &mut self.counts[key.index()]
    }
}

// 序列化为 { "mat_husk": 0, ..., "stygian": 0 },与外部持久化格式一致
impl Serialize for Inventory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let map: BTreeMap<MaterialKey, u64> = self.iter().collect();
        map.serialize(serializer)
    }
}

// 缺失键视为 0,负数截断为 0
impl<'de> Deserialize<'de> for Inventory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let map = BTreeMap::<MaterialKey, i64>::deserialize(deserializer)?;
        let mut inv = Inventory::empty();
        for (key, value) in map {
            inv.set_clamped(key, value);
        }
        Ok(inv)
    }
}

// ==========================================
// PartySlot - 队伍槽位
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PartySlot {
    #[serde(default)]
    pub name: String, // 显示名 (引擎不读取)
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub inventory: Inventory,
}

impl PartySlot {
    /// 槽位是否有数据 (名字或任意材料)
    pub fn has_data(&self) -> bool {
        !self.name.trim().is_empty() || !self.inventory.is_empty()
    }
}

// ==========================================
// Party - 四人队伍
// ==========================================
// 槽位下标即身份,引擎从不重排
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub slots: [PartySlot; PARTY_SLOTS],
}

impl Default for Party {
    /// 默认四人全部激活、背包为空
    fn default() -> Self {
        let slot = PartySlot {
            active: true,
            ..PartySlot::default()
        };
        Self {
            slots: [slot.clone(), slot.clone(), slot.clone(), slot],
        }
    }
}

impl Party {
    pub fn inventories(&self) -> [Inventory; PARTY_SLOTS] {
        [
            self.slots[0].inventory,
            self.slots[1].inventory,
            self.slots[2].inventory,
            self.slots[3].inventory,
        ]
    }

    pub fn active_mask(&self) -> [bool; PARTY_SLOTS] {
        [
            self.slots[0].active,
            self.slots[1].active,
            self.slots[2].active,
            self.slots[3].active,
        ]
    }

    /// 激活人数
    pub fn party_size(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }

    /// 推荐激活状态: 有数据的槽位激活
    pub fn suggest_active_mask(&self) -> [bool; PARTY_SLOTS] {
        [
            self.slots[0].has_data(),
            self.slots[1].has_data(),
            self.slots[2].has_data(),
            self.slots[3].has_data(),
        ]
    }

    /// 按推荐结果更新激活状态
    pub fn apply_suggested_active(&mut self) {
        let mask = self.suggest_active_mask();
        for (slot, active) in self.slots.iter_mut().zip(mask) {
            slot.active = active;
        }
    }

    /// 槽位显示名,空名回退为 "Player N"
    pub fn display_name(&self, slot: usize) -> String {
        match self.slots.get(slot) {
            Some(s) if !s.name.trim().is_empty() => s.name.trim().to_string(),
            _ => format!("Player {}", slot + 1),
        }
    }
}
