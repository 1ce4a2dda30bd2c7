use std::time::Instant;

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// 是否以 info 级别输出耗时
///
/// 开关：
/// - Debug 默认开启；Release 默认关闭
/// - `HORADRIC_ROTA_PERF=1` 强制开启
pub fn perf_enabled() -> bool {
    match std::env::var("HORADRIC_ROTA_PERF") {
        Ok(v) => is_true(&v),
        Err(_) => cfg!(debug_assertions),
    }
}

/// 性能统计 Guard：记录 elapsed_us
///
/// 使用方式：
/// ```ignore
/// let _perf = horadric_rota::perf::PerfGuard::new("api.optimize");
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    enabled: bool,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        Self {
            op,
            start: Instant::now(),
            enabled: perf_enabled(),
        }
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_us = self.start.elapsed().as_micros() as u64;

        if self.enabled {
            tracing::info!(target: "perf", op = self.op, elapsed_us, "done");
        } else {
            tracing::trace!(target: "perf", op = self.op, elapsed_us, "done");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_true() {
        assert!(is_true(" YES "));
        assert!(is_true("1"));
        assert!(!is_true("0"));
        assert!(!is_true("off"));
    }

    #[test]
    fn test_guard_drops_cleanly() {
        let guard = PerfGuard::new("test.op");
        assert_eq!(guard.op, "test.op");
        drop(guard);
    }
}
