//! 穩定共享值
//!
//! 依賴未變時每次都交出同一個 `Rc`，消費端可以用 `Rc::ptr_eq` 判斷值是否變動，
//! 不必逐欄位比較。

use std::rc::Rc;

use memo_core::MemoConfig;

use crate::DerivedValueCache;

/// 穩定共享值
pub struct StableValue<K, V> {
    cache: DerivedValueCache<K, Rc<V>>,
}

impl<K: PartialEq, V> StableValue<K, V> {
    /// 創建尚未建立值的穩定共享值
    pub fn new() -> Self {
        Self {
            cache: DerivedValueCache::new(),
        }
    }

    /// 創建帶配置的穩定共享值（配置需通過驗證）
    pub fn with_config(config: MemoConfig) -> memo_core::Result<Self> {
        Ok(Self {
            cache: DerivedValueCache::with_config(config)?,
        })
    }

    /// 取得共享值，依賴改變時才以 `make` 建立新值
    pub fn get<F>(&mut self, deps: K, make: F) -> Rc<V>
    where
        F: FnOnce() -> V,
    {
        Rc::clone(self.cache.get(deps, || Rc::new(make())))
    }

    /// 目前的共享值
    pub fn current(&self) -> Option<Rc<V>> {
        self.cache.peek().cloned()
    }
}

impl<K: PartialEq, V> Default for StableValue<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
