// ==========================================
// Boss 轮换分配 - 导入层
// ==========================================
// 职责: 外部队伍数据导入 (CSV / JSON 快照)
// ==========================================

pub mod csv_importer;
pub mod error;
pub mod snapshot;

use crate::domain::inventory::Party;
use std::path::Path;

// 重导出核心类型
pub use csv_importer::CsvPartyImporter;
pub use error::{ImportError, ImportResult};
pub use snapshot::{PartySnapshot, SnapshotImporter, SNAPSHOT_FORMAT_VERSION};

// ==========================================
// Trait: PartySource
// ==========================================
// 用途: 从文件读取四人队伍
pub trait PartySource {
    fn load_party(&self, file_path: &Path) -> ImportResult<Party>;
}

// ==========================================
// 通用加载器（根据扩展名自动选择）
// ==========================================
pub struct UniversalPartyLoader;

impl UniversalPartyLoader {
    pub fn load<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Party> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvPartyImporter.load_party(path),
            "json" => SnapshotImporter.load_party(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension() {
        let result = UniversalPartyLoader.load("party.xlsx");
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "xlsx"));
    }
}
