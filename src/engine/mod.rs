// ==========================================
// Boss 轮换分配 - 引擎层
// ==========================================
// 职责: 材料分配、交易最少化、结果校验
// 红线: 纯函数式引擎,无 I/O,无跨调用状态
// ==========================================

pub mod allocator;
pub mod orchestrator;
pub mod settlement;
pub mod trade_minimizer;

// 重导出核心引擎
pub use allocator::Allocator;
pub use orchestrator::RotaOptimizer;
pub use settlement::{
    apply_transfers, expected_holdings, verify_settlement, SettlementReport, SettlementViolation,
    ViolationKind,
};
pub use trade_minimizer::TradeMinimizer;
