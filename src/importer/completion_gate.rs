// ==========================================
// 合同登记转换 - 完成闸门
// ==========================================
// 职责: 每张表一个完成标志, 全部完成时触发一次
// ==========================================

use crate::domain::types::TableKey;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct CompletionGate {
    done: BTreeMap<TableKey, bool>,
    fired: bool,
}

impl CompletionGate {
    pub fn new(expected: impl IntoIterator<Item = TableKey>) -> Self {
        Self {
            done: expected.into_iter().map(|key| (key, false)).collect(),
            fired: false,
        }
    }

    /// 标记某张表完成
    ///
    /// # 返回
    /// - true: 本次标记使全部表完成（整个生命周期只返回一次）
    /// - false: 仍有未完成的表, 或重复/未知的表键, 或已触发过
    pub fn mark_done(&mut self, key: TableKey) -> bool {
        match self.done.get_mut(&key) {
            Some(flag) if !*flag => *flag = true,
            _ => return false,
        }

        if !self.fired && self.is_complete() {
            self.fired = true;
            return true;
        }
        false
    }

    pub fn is_complete(&self) -> bool {
        self.done.values().all(|flag| *flag)
    }

    pub fn pending(&self) -> Vec<TableKey> {
        self.done
            .iter()
            .filter(|(_, flag)| !**flag)
            .map(|(key, _)| *key)
            .collect()
    }
}

impl Default for CompletionGate {
    fn default() -> Self {
        Self::new(TableKey::ALL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_all_tables() {
        let mut gate = CompletionGate::default();
        assert!(!gate.mark_done(TableKey::Utes));
        assert!(!gate.mark_done(TableKey::Contratos));
        assert!(!gate.mark_done(TableKey::Presupuestarias));
        assert!(gate.mark_done(TableKey::Adjudicatarios));
        assert!(gate.is_complete());
        // 重复完成不再触发
        assert!(!gate.mark_done(TableKey::Adjudicatarios));
    }

    #[test]
    fn test_duplicate_completion_is_ignored() {
        let mut gate = CompletionGate::new([TableKey::Contratos, TableKey::Utes]);
        assert!(!gate.mark_done(TableKey::Contratos));
        assert!(!gate.mark_done(TableKey::Contratos));
        assert_eq!(gate.pending(), vec![TableKey::Utes]);
        assert!(gate.mark_done(TableKey::Utes));
    }

    #[test]
    fn test_unknown_key_is_ignored() {
        let mut gate = CompletionGate::new([TableKey::Contratos]);
        assert!(!gate.mark_done(TableKey::Utes));
        assert!(gate.mark_done(TableKey::Contratos));
    }

    #[test]
    fn test_order_irrelevant() {
        for order in [TableKey::ALL, {
            let mut rev = TableKey::ALL;
            rev.reverse();
            rev
        }] {
            let mut gate = CompletionGate::default();
            let fired: Vec<bool> = order.into_iter().map(|key| gate.mark_done(key)).collect();
            assert_eq!(fired, vec![false, false, false, true]);
        }
    }
}
