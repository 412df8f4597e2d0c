//! 緩存配置模型

use serde::{Deserialize, Serialize};

use crate::{MemoError, Result};

/// 未指定名稱時使用的緩存名稱
pub const DEFAULT_CACHE_NAME: &str = "derived";

/// 衍生值緩存配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoConfig {
    /// 緩存名稱（用於日誌欄位）
    pub name: String,

    /// 顯示上限
    /// - None: 不截斷
    /// - Some(n): 只顯示前 n 筆（截斷不進入緩存）
    pub display_limit: Option<usize>,
}

impl MemoConfig {
    /// 創建新的緩存配置
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_limit: None,
        }
    }

    /// 建構器模式：設置名稱
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// 建構器模式：設置顯示上限
    ///
    /// # 範例
    /// ```
    /// # use memo_core::MemoConfig;
    /// let config = MemoConfig::new("search-results").with_display_limit(100);
    /// assert_eq!(config.display_limit, Some(100));
    /// ```
    pub fn with_display_limit(mut self, limit: usize) -> Self {
        self.display_limit = Some(limit);
        self
    }

    /// 從 JSON 字串載入配置並驗證
    pub fn from_json(json: &str) -> Result<Self> {
        let config: MemoConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 驗證配置
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(MemoError::InvalidConfig("緩存名稱不可為空".to_string()));
        }

        // 不截斷請使用 None
        if self.display_limit == Some(0) {
            return Err(MemoError::InvalidConfig("顯示上限必須大於 0".to_string()));
        }

        Ok(())
    }
}

impl Default for MemoConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_NAME)
    }
}
