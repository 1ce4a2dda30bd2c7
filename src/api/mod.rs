// ==========================================
// Boss 轮换分配 - API 层
// ==========================================
// 职责: 面向调用方 (CLI / 外部界面) 的业务接口
// ==========================================

pub mod error;
pub mod rota_api;

// 重导出
pub use error::{ApiError, ApiResult};
pub use rota_api::{FileRunOutcome, RotaApi};
