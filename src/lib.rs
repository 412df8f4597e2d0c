//! # Memo
//!
//! 依賴鍵記憶化：衍生值緩存、衍生列表、記憶化元件與穩定共享值

pub use memo_cache::{CacheStats, DerivedList, DerivedValueCache, MemoizedComponent, StableValue};
pub use memo_core::{CacheEntry, KeyComparator, MemoConfig, MemoError, Result, ValueEq};
