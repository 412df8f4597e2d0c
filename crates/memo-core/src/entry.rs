//! 緩存條目

/// 單一緩存條目：依賴鍵與其衍生值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry<K, V> {
    key: K,
    value: V,
}

impl<K, V> CacheEntry<K, V> {
    /// 創建新的緩存條目
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// 依賴鍵
    pub fn key(&self) -> &K {
        &self.key
    }

    /// 衍生值
    pub fn value(&self) -> &V {
        &self.value
    }

    /// 拆解為 (鍵, 值)
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}
