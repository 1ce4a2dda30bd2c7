// ==========================================
// Boss 轮换分配 - CSV 队伍导入
// ==========================================
// 格式: slot,name,active,mat_husk,...,mat_heart,stygian
// 规则: 未知列忽略;缺失材料列视为 0;负数截断为 0;最多 4 行
// ==========================================

use crate::domain::inventory::{Party, PartySlot};
use crate::domain::types::{MaterialKey, PARTY_SLOTS};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::PartySource;
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// 列名
pub mod columns {
    pub const SLOT: &str = "slot";
    pub const NAME: &str = "name";
    pub const ACTIVE: &str = "active";
}

// ==========================================
// CsvPartyImporter
// ==========================================
pub struct CsvPartyImporter;

impl PartySource for CsvPartyImporter {
    fn load_party(&self, file_path: &Path) -> ImportResult<Party> {
        // 检查文件存在
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        // 检查扩展名
        if let Some(ext) = file_path.extension() {
            if ext != "csv" {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(file_path)?;
        let party = self.parse(file)?;
        info!(
            path = %file_path.display(),
            party_size = party.party_size(),
            "CSV 队伍导入完成"
        );
        Ok(party)
    }
}

impl CsvPartyImporter {
    /// 从任意 reader 解析队伍
    pub fn parse<R: Read>(&self, reader: R) -> ImportResult<Party> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        // 未出现的槽位保持空且未激活
        let mut party = Party {
            slots: Default::default(),
        };
        let mut seen = [false; PARTY_SLOTS];
        let mut row_count = 0usize;

        for (row_idx, result) in reader.records().enumerate() {
            // 表头为第 1 行
            let row = row_idx + 2;
            let record = result?;

            let row_map: HashMap<&str, &str> = headers
                .iter()
                .map(String::as_str)
                .zip(record.iter())
                .collect();

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            row_count += 1;
            if row_count > PARTY_SLOTS {
                return Err(ImportError::TooManyRows(row_count));
            }

            let slot = match row_map.get(columns::SLOT) {
                Some(raw) if !raw.is_empty() => parse_slot(row, raw)?,
                // 无 slot 列时按行顺序
                _ => row_count - 1,
            };
            if seen[slot] {
                return Err(ImportError::DuplicateSlot { row, slot: slot + 1 });
            }
            seen[slot] = true;

            party.slots[slot] = parse_slot_record(row, &row_map)?;
        }

        Ok(party)
    }
}

// ==========================================
// 字段解析
// ==========================================

/// 槽位列为 1-4,内部下标为 0-3
fn parse_slot(row: usize, raw: &str) -> ImportResult<usize> {
    match raw.parse::<usize>() {
        Ok(n) if (1..=PARTY_SLOTS).contains(&n) => Ok(n - 1),
        _ => Err(ImportError::InvalidSlot {
            row,
            value: raw.to_string(),
        }),
    }
}

fn parse_slot_record(row: usize, row_map: &HashMap<&str, &str>) -> ImportResult<PartySlot> {
    let mut slot = PartySlot {
        name: row_map
            .get(columns::NAME)
            .map(|s| s.to_string())
            .unwrap_or_default(),
        active: true,
        ..PartySlot::default()
    };

    if let Some(raw) = row_map.get(columns::ACTIVE) {
        if !raw.is_empty() {
            slot.active = parse_bool(raw);
        }
    }

    for key in MaterialKey::ALL {
        let raw = match row_map.get(key.as_str()) {
            Some(raw) if !raw.is_empty() => raw,
            _ => continue,
        };

        let value = raw
            .parse::<i64>()
            .map_err(|e| ImportError::TypeConversionError {
                row,
                field: key.as_str().to_string(),
                message: format!("{}: {}", raw, e),
            })?;

        if slot.inventory.set_clamped(key, value) {
            warn!(row, material = %key, value, "负数材料数量已截断为 0");
        }
    }

    Ok(slot)
}

fn parse_bool(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}
