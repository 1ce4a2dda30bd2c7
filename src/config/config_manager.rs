// ==========================================
// Boss 轮换分配 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: JSON 键值文件 (key -> value 字符串)
// 覆写顺序: 默认值 < 配置文件 < 环境变量
// ==========================================

use crate::domain::types::WildcardPriority;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    FormatError { path: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ValueError {
        key: String,
        value: String,
        message: String,
    },
}

// ==========================================
// OutputFormat - 输出格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("未知输出格式: {}", other)),
        }
    }
}

// ==========================================
// OptimizerConfig - 生效配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    pub default_priority: WildcardPriority,
    pub output_format: OutputFormat,
    pub log_filter: String,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            default_priority: WildcardPriority::default(),
            output_format: OutputFormat::Text,
            log_filter: "info".to_string(),
        }
    }
}

// ==========================================
// ConfigSource - 配置来源
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Default,
    File(PathBuf),
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    values: HashMap<String, String>,
    source: ConfigSource,
    config: OptimizerConfig,
}

impl ConfigManager {
    /// 仅使用默认值 + 环境变量
    pub fn from_defaults() -> Result<Self, ConfigError> {
        Self::build(HashMap::new(), ConfigSource::Default)
    }

    /// 从指定文件加载
    ///
    /// # 参数
    /// - path: JSON 键值文件,例如 {"default_priority": "andariel"}
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let values: HashMap<String, String> =
            serde_json::from_str(&content).map_err(|e| ConfigError::FormatError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::build(values, ConfigSource::File(path.to_path_buf()))
    }

    /// 加载配置: 显式路径 > 默认路径 (存在时) > 仅默认值
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Self::from_defaults(),
        }
    }

    fn build(values: HashMap<String, String>, source: ConfigSource) -> Result<Self, ConfigError> {
        let mut manager = Self {
            values,
            source,
            config: OptimizerConfig::default(),
        };
        manager.config = manager.resolve()?;
        info!(
            source = ?manager.source,
            priority = %manager.config.default_priority,
            format = %manager.config.output_format,
            "配置加载完成"
        );
        Ok(manager)
    }

    /// 读取配置值 (环境变量优先)
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> Option<String> {
        if let Ok(v) = std::env::var(env_var_name(key)) {
            debug!(key, "使用环境变量覆写");
            return Some(v);
        }
        self.values.get(key).cloned()
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    fn resolve(&self) -> Result<OptimizerConfig, ConfigError> {
        let mut config = OptimizerConfig::default();

        if let Some(v) = self.get_config_value(config_keys::DEFAULT_PRIORITY) {
            config.default_priority = parse_value(config_keys::DEFAULT_PRIORITY, &v)?;
        }
        if let Some(v) = self.get_config_value(config_keys::OUTPUT_FORMAT) {
            config.output_format = parse_value(config_keys::OUTPUT_FORMAT, &v)?;
        }
        if let Some(v) = self.get_config_value(config_keys::LOG_FILTER) {
            if !v.trim().is_empty() {
                config.log_filter = v.trim().to_string();
            }
        }

        Ok(config)
    }
}

fn parse_value<T: FromStr<Err = String>>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse::<T>().map_err(|message| ConfigError::ValueError {
        key: key.to_string(),
        value: value.to_string(),
        message,
    })
}

/// 配置键对应的环境变量名
pub fn env_var_name(key: &str) -> String {
    format!("{}{}", ENV_PREFIX, key.to_uppercase())
}

/// 环境变量前缀
pub const ENV_PREFIX: &str = "HORADRIC_ROTA_";

/// 默认配置文件路径: <config_dir>/horadric-rota/config.json
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("horadric-rota").join("config.json"))
}

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    // Stygian 默认优先级
    pub const DEFAULT_PRIORITY: &str = "default_priority";

    // 输出
    pub const OUTPUT_FORMAT: &str = "output_format";

    // 日志
    pub const LOG_FILTER: &str = "log_filter";
}
