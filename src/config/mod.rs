// ==========================================
// Boss 轮换分配 - 配置层
// ==========================================
// 职责: 优化器默认值、输出格式、日志过滤
// 存储: JSON 键值文件 + 环境变量覆写
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{
    config_keys, default_config_path, ConfigError, ConfigManager, ConfigSource, OptimizerConfig,
    OutputFormat,
};
