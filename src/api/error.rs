// ==========================================
// Boss 轮换分配 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换导入/配置错误为用户可读的错误消息
// 说明: 引擎本身不产生错误,错误只来自输入校验与外部文件
// ==========================================

use crate::config::ConfigError;
use crate::importer::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("无效的 Stygian 优先级: {0}")]
    InvalidPriority(String),

    #[error("没有可计算的材料: 至少一名激活玩家需要录入材料")]
    NoMaterials,

    // ==========================================
    // 外部数据错误
    // ==========================================
    #[error("导入失败: {0}")]
    ImportError(#[from] ImportError),

    #[error("配置错误: {0}")]
    ConfigError(#[from] ConfigError),
}

/// API层 Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
