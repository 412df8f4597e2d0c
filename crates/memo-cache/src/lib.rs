//! # Memo Cache
//!
//! 衍生值緩存與建立在其上的記憶化模式

pub mod component;
pub mod derived;
pub mod list;
pub mod stable;
pub mod stats;

// Re-export 主要類型
pub use component::MemoizedComponent;
pub use derived::DerivedValueCache;
pub use list::DerivedList;
pub use stable::StableValue;
pub use stats::CacheStats;
