//! 緩存命中統計

use serde::Serialize;

/// 緩存命中統計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// 命中次數（未執行計算）
    pub hits: u64,

    /// 未命中次數（計算成功並寫入緩存）
    pub misses: u64,

    /// 計算失敗次數（緩存未變動）
    pub failures: u64,
}

impl CacheStats {
    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_failure(&mut self) {
        self.failures += 1;
    }

    /// 查詢總次數
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses + self.failures
    }

    /// 計算函數被呼叫的次數（成功與失敗）
    pub fn computations(&self) -> u64 {
        self.misses + self.failures
    }

    /// 命中率（尚無查詢時為 0）
    pub fn hit_ratio(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }
}
