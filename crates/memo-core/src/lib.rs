//! # Memo Core
//!
//! 記憶化計算的核心資料模型與類型定義

pub mod config;
pub mod entry;
pub mod key;

// Re-export 主要類型
pub use config::MemoConfig;
pub use entry::CacheEntry;
pub use key::{KeyComparator, ValueEq};

/// 記憶化模組錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum MemoError {
    #[error("無效的緩存配置: {0}")]
    InvalidConfig(String),

    #[error("配置解析錯誤: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MemoError>;
