// ==========================================
// Boss 轮换分配 - 领域类型定义
// ==========================================
// 职责: Boss 标识、材料键、Stygian 优先级
// 红线: 全部为封闭枚举,不允许字符串键直接进入引擎
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 队伍固定槽位数
pub const PARTY_SLOTS: usize = 4;

/// 材料键数量 (9 种专属材料 + 1 种通配)
pub const MATERIAL_KEY_COUNT: usize = 10;

// ==========================================
// Boss 标识 (Action Type)
// ==========================================
// 顺序即目录顺序,输出排序依赖 Ord
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BossId {
    Belial,
    Harbinger,
    Andariel,
    Duriel,
    Urivar,
    Zir,
    Beast,
    Grigoire,
    Varshan,
}

impl BossId {
    /// 目录顺序的全部 Boss
    pub const ALL: [BossId; 9] = [
        BossId::Belial,
        BossId::Harbinger,
        BossId::Andariel,
        BossId::Duriel,
        BossId::Urivar,
        BossId::Zir,
        BossId::Beast,
        BossId::Grigoire,
        BossId::Varshan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BossId::Belial => "belial",
            BossId::Harbinger => "harbinger",
            BossId::Andariel => "andariel",
            BossId::Duriel => "duriel",
            BossId::Urivar => "urivar",
            BossId::Zir => "zir",
            BossId::Beast => "beast",
            BossId::Grigoire => "grigoire",
            BossId::Varshan => "varshan",
        }
    }
}

impl fmt::Display for BossId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BossId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        BossId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == key)
            .ok_or_else(|| format!("未知 Boss: {}", s))
    }
}

// ==========================================
// 材料键 (Material Key)
// ==========================================
// Stygian 为唯一通配材料
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MaterialKey {
    #[serde(rename = "mat_husk")]
    Husk,
    #[serde(rename = "mat_abhorrent")]
    Abhorrent,
    #[serde(rename = "mat_doll")]
    Doll,
    #[serde(rename = "mat_shard")]
    Shard,
    #[serde(rename = "mat_mask")]
    Mask,
    #[serde(rename = "mat_blood")]
    Blood,
    #[serde(rename = "mat_fear")]
    Fear,
    #[serde(rename = "mat_steel")]
    Steel,
    #[serde(rename = "mat_heart")]
    Heart,
    #[serde(rename = "stygian")]
    Stygian,
}

impl MaterialKey {
    /// 全部材料键 (含通配),顺序与 Inventory 内部数组一致
    pub const ALL: [MaterialKey; MATERIAL_KEY_COUNT] = [
        MaterialKey::Husk,
        MaterialKey::Abhorrent,
        MaterialKey::Doll,
        MaterialKey::Shard,
        MaterialKey::Mask,
        MaterialKey::Blood,
        MaterialKey::Fear,
        MaterialKey::Steel,
        MaterialKey::Heart,
        MaterialKey::Stygian,
    ];

    /// Inventory 数组下标
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, MaterialKey::Stygian)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialKey::Husk => "mat_husk",
            MaterialKey::Abhorrent => "mat_abhorrent",
            MaterialKey::Doll => "mat_doll",
            MaterialKey::Shard => "mat_shard",
            MaterialKey::Mask => "mat_mask",
            MaterialKey::Blood => "mat_blood",
            MaterialKey::Fear => "mat_fear",
            MaterialKey::Steel => "mat_steel",
            MaterialKey::Heart => "mat_heart",
            MaterialKey::Stygian => "stygian",
        }
    }
}

impl fmt::Display for MaterialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MaterialKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        MaterialKey::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == key)
            .ok_or_else(|| format!("未知材料: {}", s))
    }
}

// ==========================================
// Stygian 优先级 (Wildcard Priority)
// ==========================================
// 字符串形式: Boss id 或 "balanced"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WildcardPriority {
    Boss(BossId),
    Balanced,
}

impl WildcardPriority {
    pub const BALANCED: &'static str = "balanced";

    /// 被优先的 Boss (balanced 时为 None)
    pub fn target(&self) -> Option<BossId> {
        match self {
            WildcardPriority::Boss(id) => Some(*id),
            WildcardPriority::Balanced => None,
        }
    }

    pub fn is_balanced(&self) -> bool {
        matches!(self, WildcardPriority::Balanced)
    }
}

impl Default for WildcardPriority {
    fn default() -> Self {
        WildcardPriority::Boss(BossId::Duriel)
    }
}

impl fmt::Display for WildcardPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WildcardPriority::Boss(id) => write!(f, "{}", id),
            WildcardPriority::Balanced => write!(f, "{}", Self::BALANCED),
        }
    }
}

impl FromStr for WildcardPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(Self::BALANCED) {
            return Ok(WildcardPriority::Balanced);
        }
        s.parse::<BossId>()
            .map(WildcardPriority::Boss)
            .map_err(|_| format!("无效的 Stygian 优先级: {}", s))
    }
}

impl TryFrom<String> for WildcardPriority {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WildcardPriority> for String {
    fn from(value: WildcardPriority) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_index_matches_all_order() {
        for (i, key) in MaterialKey::ALL.iter().enumerate() {
            assert_eq!(key.index(), i);
        }
        assert!(MaterialKey::Stygian.is_wildcard());
        assert!(!MaterialKey::Shard.is_wildcard());
    }

    #[test]
    fn test_boss_order_follows_catalog() {
        let mut sorted = BossId::ALL;
        sorted.sort();
        assert_eq!(sorted, BossId::ALL);
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!(
            "duriel".parse::<WildcardPriority>().unwrap(),
            WildcardPriority::Boss(BossId::Duriel)
        );
        assert_eq!(
            " Balanced ".parse::<WildcardPriority>().unwrap(),
            WildcardPriority::Balanced
        );
        assert!("mephisto".parse::<WildcardPriority>().is_err());
    }

    #[test]
    fn test_priority_serde_uses_plain_string() {
        let json = serde_json::to_string(&WildcardPriority::Boss(BossId::Andariel)).unwrap();
        assert_eq!(json, "\"andariel\"");

        let back: WildcardPriority = serde_json::from_str("\"balanced\"").unwrap();
        assert_eq!(back, WildcardPriority::Balanced);
    }

    #[test]
    fn test_material_serde_keys() {
        let json = serde_json::to_string(&MaterialKey::Husk).unwrap();
        assert_eq!(json, "\"mat_husk\"");
        assert_eq!("stygian".parse::<MaterialKey>().unwrap(), MaterialKey::Stygian);
    }
}
