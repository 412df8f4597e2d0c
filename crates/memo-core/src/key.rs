//! 依賴鍵比較策略

/// 判斷新舊依賴鍵是否視為相同
///
/// 回傳 `true` 表示沿用緩存值，不重新計算。任何 `Fn(&K, &K) -> bool` 都可直接當作策略使用。
pub trait KeyComparator<K: ?Sized> {
    fn same_key(&self, previous: &K, next: &K) -> bool;
}

/// 預設策略：值相等（`PartialEq`）
///
/// 複合鍵（tuple、struct）逐欄位比較，不比較記憶體位址。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValueEq;

impl<K: PartialEq + ?Sized> KeyComparator<K> for ValueEq {
    fn same_key(&self, previous: &K, next: &K) -> bool {
        previous == next
    }
}

impl<K: ?Sized, F> KeyComparator<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    fn same_key(&self, previous: &K, next: &K) -> bool {
        self(previous, next)
    }
}
