//! 記憶化元件：props 未變時略過渲染函數

use memo_core::MemoConfig;

use crate::DerivedValueCache;

/// 記憶化元件
///
/// 以 props 作為依賴鍵保存上次的渲染輸出。宿主框架每輪重新評估都可以呼叫 [`render`](Self::render)，
/// 只有 props 改變時渲染函數才會真正執行。
pub struct MemoizedComponent<P, O> {
    cache: DerivedValueCache<P, O>,
}

impl<P: PartialEq + Clone, O> MemoizedComponent<P, O> {
    /// 創建尚未渲染的元件
    pub fn new() -> Self {
        Self {
            cache: DerivedValueCache::new(),
        }
    }

    /// 創建帶配置的元件（配置需通過驗證）
    pub fn with_config(config: MemoConfig) -> memo_core::Result<Self> {
        Ok(Self {
            cache: DerivedValueCache::with_config(config)?,
        })
    }

    /// 渲染（props 相等時回傳上次輸出）
    ///
    /// props 會被複製一份作為依賴鍵保存。
    pub fn render<F>(&mut self, props: P, render_fn: F) -> &O
    where
        F: FnOnce(&P) -> O,
    {
        self.cache.get(props.clone(), move || render_fn(&props))
    }

    /// 渲染函數實際執行次數
    pub fn render_count(&self) -> u64 {
        self.cache.stats().misses
    }

    /// 上次渲染使用的 props
    pub fn last_props(&self) -> Option<&P> {
        self.cache.key()
    }

    /// 上次渲染輸出
    pub fn last_output(&self) -> Option<&O> {
        self.cache.peek()
    }
}

impl<P: PartialEq + Clone, O> Default for MemoizedComponent<P, O> {
    fn default() -> Self {
        Self::new()
    }
}
