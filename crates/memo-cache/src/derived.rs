//! 衍生值緩存
//!
//! 單槽記憶化：保留最近一次的 (依賴鍵, 衍生值)。依賴鍵不變時直接回傳緩存值，
//! 依賴鍵改變時才重新計算並取代舊條目。

use std::convert::Infallible;

use memo_core::{CacheEntry, KeyComparator, MemoConfig, ValueEq};

use crate::CacheStats;

/// 衍生值緩存
pub struct DerivedValueCache<K, V, C = ValueEq> {
    /// 目前保留的條目（最多一筆）
    entry: Option<CacheEntry<K, V>>,

    /// 依賴鍵比較策略
    comparator: C,

    config: MemoConfig,

    stats: CacheStats,
}

impl<K: PartialEq, V> DerivedValueCache<K, V> {
    /// 創建使用值相等比較的空緩存
    pub fn new() -> Self {
        Self::unchecked(MemoConfig::default(), ValueEq)
    }

    /// 創建帶配置的空緩存（配置需通過驗證）
    pub fn with_config(config: MemoConfig) -> memo_core::Result<Self> {
        Self::from_parts(config, ValueEq)
    }
}

impl<K: PartialEq, V> Default for DerivedValueCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: KeyComparator<K>> DerivedValueCache<K, V, C> {
    /// 創建使用自訂比較策略的空緩存
    pub fn with_comparator(comparator: C) -> Self {
        Self::unchecked(MemoConfig::default(), comparator)
    }

    /// 由配置與比較策略創建空緩存（配置需通過驗證）
    pub fn from_parts(config: MemoConfig, comparator: C) -> memo_core::Result<Self> {
        config.validate()?;
        Ok(Self::unchecked(config, comparator))
    }

    fn unchecked(config: MemoConfig, comparator: C) -> Self {
        Self {
            entry: None,
            comparator,
            config,
            stats: CacheStats::default(),
        }
    }

    /// 取得衍生值，必要時才呼叫 `compute`
    ///
    /// # 範例
    /// ```
    /// # use memo_cache::DerivedValueCache;
    /// let mut cache = DerivedValueCache::new();
    /// assert_eq!(*cache.get("a", || 1), 1);
    /// assert_eq!(*cache.get("a", || 2), 1); // 命中，不執行計算
    /// assert_eq!(*cache.get("b", || 3), 3); // 依賴鍵變更，取代條目
    /// ```
    pub fn get<F>(&mut self, key: K, compute: F) -> &V
    where
        F: FnOnce() -> V,
    {
        match self.try_get(key, || Ok::<V, Infallible>(compute())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// 取得衍生值，計算可能失敗
    ///
    /// 計算失敗時緩存維持原狀（包括先前其他依賴鍵的條目），錯誤原封不動回傳給呼叫端。
    pub fn try_get<E, F>(&mut self, key: K, compute: F) -> Result<&V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let name = self.config.name.as_str();

        // 每個分支原地處理槽位；先計算再寫入，計算失敗或 panic 時條目不變
        match &mut self.entry {
            Some(entry) => {
                if self.comparator.same_key(entry.key(), &key) {
                    self.stats.record_hit();
                    tracing::trace!(cache = name, "衍生值緩存命中");
                    return Ok(entry.value());
                }

                let value = recompute(&mut self.stats, name, true, compute)?;
                *entry = CacheEntry::new(key, value);
                Ok(entry.value())
            }
            slot @ None => {
                let value = recompute(&mut self.stats, name, false, compute)?;
                Ok(slot.insert(CacheEntry::new(key, value)).value())
            }
        }
    }

    /// 查看目前緩存值（不觸發計算）
    pub fn peek(&self) -> Option<&V> {
        self.entry.as_ref().map(CacheEntry::value)
    }

    /// 目前緩存值對應的依賴鍵
    pub fn key(&self) -> Option<&K> {
        self.entry.as_ref().map(CacheEntry::key)
    }

    /// 是否已有緩存值
    pub fn is_populated(&self) -> bool {
        self.entry.is_some()
    }

    /// 命中統計
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// 緩存配置
    pub fn config(&self) -> &MemoConfig {
        &self.config
    }
}

/// 執行計算並記錄統計與日誌
fn recompute<V, E, F>(stats: &mut CacheStats, name: &str, replacing: bool, compute: F) -> Result<V, E>
where
    F: FnOnce() -> Result<V, E>,
{
    match compute() {
        Ok(value) => {
            stats.record_miss();
            tracing::debug!(cache = name, replacing, "依賴鍵變更，重新計算衍生值");
            Ok(value)
        }
        Err(err) => {
            stats.record_failure();
            tracing::warn!(cache = name, replacing, "衍生值計算失敗，緩存維持原狀");
            Err(err)
        }
    }
}

impl<K: std::fmt::Debug, V: std::fmt::Debug, C> std::fmt::Debug for DerivedValueCache<K, V, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedValueCache")
            .field("name", &self.config.name)
            .field("entry", &self.entry)
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use std::cell::Cell;

    #[test]
    fn test_hit_then_replace() {
        let mut cache = DerivedValueCache::new();

        assert_eq!(*cache.get("a", || 1), 1);
        assert_eq!(*cache.get("a", || 2), 1);
        assert_eq!(*cache.get("b", || 3), 3);

        assert_eq!(cache.key(), Some(&"b"));
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 2,
                failures: 0,
            }
        );
    }

    #[test]
    fn test_empty_cache() {
        let cache: DerivedValueCache<&str, i32> = DerivedValueCache::default();

        assert!(!cache.is_populated());
        assert_eq!(cache.peek(), None);
        assert_eq!(cache.key(), None);
        assert_eq!(cache.stats().lookups(), 0);
    }

    #[test]
    fn test_compute_skipped_on_hit() {
        let mut cache = DerivedValueCache::new();
        let calls = Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            vec![1, 2, 3]
        };

        for _ in 0..5 {
            assert_eq!(cache.get(("todos", "active"), compute), &vec![1, 2, 3]);
        }

        assert_eq!(calls.get(), 1);
    }

    #[rstest]
    #[case(("all", 10), ("all", 10), false)]
    #[case(("all", 10), ("all", 11), true)]
    #[case(("all", 10), ("done", 10), true)]
    fn test_composite_key_shallow_equality(
        #[case] first: (&'static str, u32),
        #[case] second: (&'static str, u32),
        #[case] recomputes: bool,
    ) {
        let mut cache = DerivedValueCache::new();
        cache.get(first, || "first");

        let ran = Cell::new(false);
        let value = *cache.get(second, || {
            ran.set(true);
            "second"
        });

        assert_eq!(ran.get(), recomputes);
        assert_eq!(value, if recomputes { "second" } else { "first" });
    }

    #[test]
    fn test_equal_owned_keys_hit() {
        let mut cache = DerivedValueCache::new();
        cache.get(String::from("bike"), || 1);

        // 另一個內容相同的 String
        assert_eq!(*cache.get("bike".to_string(), || 2), 1);
    }

    #[test]
    fn test_failure_on_empty_cache_stores_nothing() {
        let mut cache = DerivedValueCache::new();

        let result: Result<&i32, &str> = cache.try_get("x", || Err("boom"));
        assert_eq!(result, Err("boom"));
        assert!(!cache.is_populated());

        // 同一依賴鍵仍會執行計算
        let ran = Cell::new(false);
        let value = cache.try_get("x", || {
            ran.set(true);
            Ok::<_, &str>(7)
        });
        assert_eq!(value, Ok(&7));
        assert!(ran.get());
        assert_eq!(cache.stats().failures, 1);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_failure_keeps_previous_entry() {
        let mut cache = DerivedValueCache::new();
        cache.get("a", || 1);

        let result = cache.try_get("b", || Err::<i32, _>("boom"));
        assert_eq!(result, Err("boom"));

        assert_eq!(cache.key(), Some(&"a"));
        assert_eq!(cache.peek(), Some(&1));
        assert_eq!(*cache.get("a", || 99), 1);
    }

    #[test]
    fn test_error_is_returned_unmodified() {
        #[derive(Debug, PartialEq)]
        struct FilterError {
            code: u16,
        }

        let mut cache: DerivedValueCache<u8, String> = DerivedValueCache::new();
        let err = cache
            .try_get(1, || Err(FilterError { code: 418 }))
            .unwrap_err();

        assert_eq!(err, FilterError { code: 418 });
    }

    #[test]
    fn test_panic_leaves_entry_unchanged() {
        let mut cache = DerivedValueCache::new();
        cache.get("a", || 1);

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            cache.get("b", || panic!("compute panicked"));
        }));

        assert!(outcome.is_err());
        assert_eq!(cache.key(), Some(&"a"));
        assert_eq!(cache.peek(), Some(&1));
    }

    #[test]
    fn test_custom_comparator() {
        let mut cache = DerivedValueCache::with_comparator(|a: &f64, b: &f64| (a - b).abs() < 0.01);

        assert_eq!(*cache.get(1.000, || "one"), "one");
        assert_eq!(*cache.get(1.005, || "close"), "one");
        assert_eq!(*cache.get(2.0, || "two"), "two");
    }

    #[test]
    fn test_with_config() {
        let cache: DerivedValueCache<u32, u32> =
            DerivedValueCache::with_config(MemoConfig::new("filtered-todos")).unwrap();

        assert_eq!(cache.config().name, "filtered-todos");
    }

    #[rstest]
    #[case(MemoConfig::new(""))]
    #[case(MemoConfig::new("  "))]
    #[case(MemoConfig::new("todos").with_display_limit(0))]
    fn test_with_config_rejects_invalid(#[case] config: MemoConfig) {
        let result: memo_core::Result<DerivedValueCache<u32, u32>> =
            DerivedValueCache::with_config(config);

        assert!(matches!(result, Err(memo_core::MemoError::InvalidConfig(_))));
    }

    #[test]
    fn test_replace_in_place_then_hit() {
        // 已有條目時：命中、取代、失敗、再命中都在同一個槽位上
        let mut cache = DerivedValueCache::new();
        let calls = Cell::new(0);
        let lookup = |cache: &mut DerivedValueCache<u8, u32>, key: u8| {
            *cache.get(key, || {
                calls.set(calls.get() + 1);
                u32::from(key) * 100
            })
        };

        assert_eq!(lookup(&mut cache, 1), 100);
        assert_eq!(lookup(&mut cache, 2), 200);
        assert_eq!(cache.try_get(3, || Err::<u32, _>("boom")), Err("boom"));
        assert_eq!(lookup(&mut cache, 2), 200);
        assert_eq!(lookup(&mut cache, 1), 100);

        assert_eq!(calls.get(), 3);
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 3,
                failures: 1,
            }
        );
    }

    proptest! {
        #[test]
        fn prop_equal_keys_never_recompute(key in any::<i32>(), first in any::<u8>(), second in any::<u8>()) {
            let mut cache = DerivedValueCache::new();
            cache.get(key, || first);

            let ran = Cell::new(false);
            let value = *cache.get(key, || {
                ran.set(true);
                second
            });

            prop_assert!(!ran.get());
            prop_assert_eq!(value, first);
        }

        #[test]
        fn prop_different_keys_recompute_once(k1 in any::<i32>(), k2 in any::<i32>(), v in any::<u8>()) {
            prop_assume!(k1 != k2);

            let mut cache = DerivedValueCache::new();
            cache.get(k1, || 0u8);

            let calls = Cell::new(0);
            let value = *cache.get(k2, || {
                calls.set(calls.get() + 1);
                v
            });

            prop_assert_eq!(calls.get(), 1);
            prop_assert_eq!(value, v);
        }

        #[test]
        fn prop_calls_match_key_changes(keys in proptest::collection::vec(0u8..4, 1..50)) {
            let mut cache = DerivedValueCache::new();
            let calls = Cell::new(0usize);

            for key in &keys {
                let value = *cache.get(*key, || {
                    calls.set(calls.get() + 1);
                    u32::from(*key) * 10
                });
                prop_assert_eq!(value, u32::from(*key) * 10);
            }

            let changes = 1 + keys.windows(2).filter(|w| w[0] != w[1]).count();
            prop_assert_eq!(calls.get(), changes);
            prop_assert_eq!(cache.stats().lookups(), keys.len() as u64);
        }
    }
}
