// ==========================================
// Boss 轮换分配 - 核心库
// ==========================================
// 职责: 四人队伍 Boss 召唤材料分配 + 最少交易结算
// 技术栈: Rust + serde + tracing
// 系统定位: 纯计算工具 (结果供玩家参考,交易由玩家手动执行)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体、类型、Boss 目录
pub mod domain;

// 引擎层 - 分配、交易、校验
pub mod engine;

// 导入层 - CSV / JSON 快照
pub mod importer;

// 配置层 - 默认值与覆写
pub mod config;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{BossId, MaterialKey, WildcardPriority, PARTY_SLOTS};

// 领域实体
pub use domain::{
    AllocationResult, BossData, Inventory, OptimizationResult, Party, PartySlot, TradePlan,
    Transfer, BOSS_CATALOG,
};

// 引擎
pub use engine::{Allocator, RotaOptimizer, SettlementReport, TradeMinimizer};

// API
pub use api::{ApiError, ApiResult, RotaApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Horadric Rota";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
