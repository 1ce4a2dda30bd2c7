// ==========================================
// Boss 轮换分配 - 轮换计算 API
// ==========================================
// 职责: 校验调用方输入,调用引擎,校验结果一致性
// 说明: 激活掩码与人数由 Party 推导,保证两者一致
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigManager, OptimizerConfig};
use crate::domain::inventory::Party;
use crate::domain::result::OptimizationResult;
use crate::domain::types::WildcardPriority;
use crate::engine::{verify_settlement, RotaOptimizer, SettlementReport};
use crate::importer::{PartySnapshot, UniversalPartyLoader};
use crate::perf::PerfGuard;
use std::path::Path;
use tracing::{info, instrument, warn};

/// 从文件加载并计算的结果
#[derive(Debug, Clone)]
pub struct FileRunOutcome {
    pub party: Party,
    pub priority: WildcardPriority,
    pub result: OptimizationResult,
}

// ==========================================
// RotaApi
// ==========================================
pub struct RotaApi {
    optimizer: RotaOptimizer,
    config: OptimizerConfig,
    default_priority: WildcardPriority,
}

impl RotaApi {
    pub fn new(config: &OptimizerConfig) -> Self {
        Self {
            optimizer: RotaOptimizer::new(),
            config: config.clone(),
            default_priority: config.default_priority,
        }
    }

    /// 按配置文件构造: 显式路径 > 默认路径 (存在时) > 默认值
    pub fn from_config_path(path: Option<&Path>) -> ApiResult<Self> {
        let manager = ConfigManager::load(path)?;
        Ok(Self::new(manager.config()))
    }

    /// 生效配置
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// 解析优先级参数,未提供时使用配置默认值
    pub fn parse_priority(&self, raw: Option<&str>) -> ApiResult<WildcardPriority> {
        match raw {
            Some(s) if !s.trim().is_empty() => s
                .parse::<WildcardPriority>()
                .map_err(|_| ApiError::InvalidPriority(s.to_string())),
            _ => Ok(self.default_priority),
        }
    }

    /// 计算一支队伍的轮换
    ///
    /// # 返回
    /// - Ok(OptimizationResult)
    /// - Err(ApiError::NoMaterials): 没有激活玩家,或激活玩家背包全空
    #[instrument(skip(self, party, priority), fields(priority = %priority))]
    pub fn optimize(
        &self,
        party: &Party,
        priority: WildcardPriority,
    ) -> ApiResult<OptimizationResult> {
        let _perf = PerfGuard::new("api.optimize");

        let inventories = party.inventories();
        let active = party.active_mask();
        let party_size = party.party_size();

        let has_materials = inventories
            .iter()
            .zip(active.iter())
            .any(|(inv, a)| *a && !inv.is_empty());
        if !has_materials {
            return Err(ApiError::NoMaterials);
        }

        let result = self
            .optimizer
            .optimize(&inventories, priority, &active, party_size);

        let report = verify_settlement(&inventories, &active, &result);
        if !report.is_consistent() {
            for violation in &report.violations {
                warn!(
                    kind = %violation.kind,
                    slot = ?violation.slot,
                    reason = %violation.reason,
                    "交易结算校验未通过"
                );
            }
        }

        info!(
            party_size,
            total_count = result.total_count,
            consistent = report.is_consistent(),
            "队伍计算完成"
        );
        Ok(result)
    }

    /// 结算校验 (交易后持有量 + 违规列表)
    pub fn verify(&self, party: &Party, result: &OptimizationResult) -> SettlementReport {
        verify_settlement(&party.inventories(), &party.active_mask(), result)
    }

    /// 从 CSV 或 JSON 快照加载队伍并计算
    ///
    /// 优先级: 显式参数 > 快照内优先级 > 配置默认值
    pub fn optimize_file(&self, path: &Path, priority: Option<&str>) -> ApiResult<FileRunOutcome> {
        let is_snapshot = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let (party, stored_priority) = if is_snapshot {
            let snapshot = PartySnapshot::load_from(path)?;
            (snapshot.party, Some(snapshot.priority))
        } else {
            (UniversalPartyLoader.load(path)?, None)
        };

        let priority = match (priority, stored_priority) {
            (Some(raw), _) if !raw.trim().is_empty() => self.parse_priority(Some(raw))?,
            (_, Some(stored)) => stored,
            _ => self.default_priority,
        };

        let result = self.optimize(&party, priority)?;
        Ok(FileRunOutcome {
            party,
            priority,
            result,
        })
    }

    /// 将队伍、优先级与结果保存为快照
    pub fn save_snapshot(
        &self,
        path: &Path,
        party: &Party,
        priority: WildcardPriority,
        result: Option<&OptimizationResult>,
    ) -> ApiResult<PartySnapshot> {
        let snapshot = PartySnapshot::new(party.clone(), priority, result.cloned());
        snapshot.save_to(path)?;
        Ok(snapshot)
    }
}

impl Default for RotaApi {
    fn default() -> Self {
        Self::new(&OptimizerConfig::default())
    }
}
