// ==========================================
// Boss 轮换分配 - 队伍快照 (JSON)
// ==========================================
// 职责: 队伍输入 + 优先级 + 可选计算结果的保存/加载
// 说明: 快照格式只属于外层,引擎对其无感知
// ==========================================

use crate::domain::inventory::Party;
use crate::domain::result::OptimizationResult;
use crate::domain::types::WildcardPriority;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::PartySource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;
use uuid::Uuid;

/// 当前快照格式版本
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

// ==========================================
// PartySnapshot
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartySnapshot {
    pub format_version: u32,
    pub snapshot_id: Uuid,
    pub saved_at: DateTime<Utc>,
    #[serde(default)]
    pub priority: WildcardPriority,
    pub party: Party,
    #[serde(default)]
    pub result: Option<OptimizationResult>,
}

impl PartySnapshot {
    /// 新建快照 (生成 snapshot_id 与保存时间)
    pub fn new(
        party: Party,
        priority: WildcardPriority,
        result: Option<OptimizationResult>,
    ) -> Self {
        Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            snapshot_id: Uuid::new_v4(),
            saved_at: Utc::now(),
            priority,
            party,
            result,
        }
    }

    /// 保存为格式化 JSON
    pub fn save_to(&self, path: &Path) -> ImportResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| ImportError::FileWriteError(e.to_string()))?;
        info!(
            snapshot_id = %self.snapshot_id,
            path = %path.display(),
            "快照已保存"
        );
        Ok(())
    }

    /// 从 JSON 文件加载
    pub fn load_from(path: &Path) -> ImportResult<Self> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let json = fs::read_to_string(path)?;
        let snapshot: PartySnapshot = serde_json::from_str(&json)?;

        if snapshot.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(ImportError::SnapshotVersionMismatch {
                found: snapshot.format_version,
                expected: SNAPSHOT_FORMAT_VERSION,
            });
        }

        Ok(snapshot)
    }
}

// ==========================================
// SnapshotImporter - 只取队伍部分
// ==========================================
pub struct SnapshotImporter;

impl PartySource for SnapshotImporter {
    fn load_party(&self, file_path: &Path) -> ImportResult<Party> {
        PartySnapshot::load_from(file_path).map(|s| s.party)
    }
}
