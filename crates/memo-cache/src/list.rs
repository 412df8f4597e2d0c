//! 衍生列表：緩存完整結果，顯示截斷另行處理

use memo_core::{KeyComparator, MemoConfig, MemoError, ValueEq};

use crate::{CacheStats, DerivedValueCache};

/// 衍生列表
///
/// 完整的衍生列表（例如篩選結果）進入緩存；截斷到顯示上限是每次呼叫都執行的廉價步驟，
/// 調整顯示上限不會觸發重新計算。
pub struct DerivedList<K, T, C = ValueEq> {
    cache: DerivedValueCache<K, Vec<T>, C>,
    display_limit: Option<usize>,
}

impl<K: PartialEq, T> DerivedList<K, T> {
    /// 創建不截斷的空列表
    pub fn new() -> Self {
        Self {
            cache: DerivedValueCache::new(),
            display_limit: None,
        }
    }

    /// 依配置創建（顯示上限取自 `display_limit`，配置需通過驗證）
    pub fn with_config(config: MemoConfig) -> memo_core::Result<Self> {
        Self::from_parts(config, ValueEq)
    }
}

impl<K: PartialEq, T> Default for DerivedList<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T, C: KeyComparator<K>> DerivedList<K, T, C> {
    /// 由配置與比較策略創建
    pub fn from_parts(config: MemoConfig, comparator: C) -> memo_core::Result<Self> {
        let display_limit = config.display_limit;
        Ok(Self {
            cache: DerivedValueCache::from_parts(config, comparator)?,
            display_limit,
        })
    }

    /// 取得截斷後的顯示切片
    pub fn view<F>(&mut self, key: K, compute: F) -> &[T]
    where
        F: FnOnce() -> Vec<T>,
    {
        let limit = self.display_limit;
        truncate(self.cache.get(key, compute), limit)
    }

    /// 取得截斷後的顯示切片，計算可能失敗
    pub fn try_view<E, F>(&mut self, key: K, compute: F) -> Result<&[T], E>
    where
        F: FnOnce() -> Result<Vec<T>, E>,
    {
        let limit = self.display_limit;
        let items = self.cache.try_get(key, compute)?;
        Ok(truncate(items, limit))
    }

    /// 完整列表（未截斷）
    pub fn full(&self) -> Option<&[T]> {
        self.cache.peek().map(Vec::as_slice)
    }

    /// 完整列表長度
    pub fn total_len(&self) -> usize {
        self.cache.peek().map_or(0, Vec::len)
    }

    /// 目前的顯示上限
    pub fn display_limit(&self) -> Option<usize> {
        self.display_limit
    }

    /// 設置顯示上限（不影響緩存）
    ///
    /// 上限為 0 時回傳 [`MemoError::InvalidConfig`]，原上限不變；不截斷請使用 `None`。
    pub fn set_display_limit(&mut self, limit: Option<usize>) -> memo_core::Result<()> {
        if limit == Some(0) {
            return Err(MemoError::InvalidConfig("顯示上限必須大於 0".to_string()));
        }
        self.display_limit = limit;
        Ok(())
    }

    /// 命中統計
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

fn truncate<T>(items: &[T], limit: Option<usize>) -> &[T] {
    match limit {
        Some(limit) if limit < items.len() => &items[..limit],
        _ => items,
    }
}
