use crate::domain::model::BatchStoreOperations;
use crate::domain::ports::KeyValueStore;
use crate::utils::error::Result;
use crate::utils::safe_log::Logger;

/// 批次中某個操作失敗後的處理方式
///
/// 兩種策略都不會回滾；失敗前已套用的操作維持原狀
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// 嘗試所有操作，最後回報第一個失敗
    #[default]
    ContinueOnError,
    /// 遇到第一個失敗就停止並回報
    StopOnFirstError,
}

pub struct BatchStoreOperator<S: KeyValueStore> {
    store: S,
    policy: FailurePolicy,
    logger: Logger,
}

impl<S: KeyValueStore> BatchStoreOperator<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            policy: FailurePolicy::default(),
            logger: Logger::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// 先套用所有 set，再套用所有 delete
    pub fn apply(&self, ops: &BatchStoreOperations) -> Result<()> {
        if ops.is_empty() {
            return Ok(());
        }

        tracing::debug!(
            sets = ops.sets.len(),
            deletes = ops.deletes.len(),
            policy = ?self.policy,
            "Applying batch store operations"
        );

        let mut first_error = None;

        for (key, value) in &ops.sets {
            if let Err(e) = self.store.set(key, value) {
                tracing::warn!(key = %key, error = %e, "store set failed");
                self.logger
                    .log_fmt(format_args!("failed to set key {}: {}", key, e));
                if self.policy == FailurePolicy::StopOnFirstError {
                    return Err(e);
                }
                first_error.get_or_insert(e);
            }
        }

        for key in &ops.deletes {
            if let Err(e) = self.store.delete(key) {
                tracing::warn!(key = %key, error = %e, "store delete failed");
                self.logger
                    .log_fmt(format_args!("failed to delete key {}: {}", key, e));
                if self.policy == FailurePolicy::StopOnFirstError {
                    return Err(e);
                }
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// 將 `ops` 套用到 `store`：每個操作都會嘗試，回傳第一個失敗
pub fn execute_batch_store_operations<S: KeyValueStore>(
    store: &S,
    ops: &BatchStoreOperations,
) -> Result<()> {
    BatchStoreOperator::new(store).apply(ops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;
    use crate::utils::error::UtilError;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// 對指定的 key 讓 `set`/`delete` 失敗，並記錄每次嘗試
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        failing: HashSet<String>,
        attempts: Mutex<Vec<String>>,
    }

    impl FlakyStore {
        fn failing_on(keys: &[&str]) -> Self {
            Self {
                failing: keys.iter().map(|k| k.to_string()).collect(),
                ..Default::default()
            }
        }

        fn check(&self, op: &str, key: &str) -> Result<()> {
            self.attempts.lock().unwrap().push(format!("{} {}", op, key));
            if self.failing.contains(key) {
                return Err(UtilError::StoreError {
                    message: format!("{} {} rejected", op, key),
                });
            }
            Ok(())
        }
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<String> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.check("set", key)?;
            self.inner.set(key, value)
        }

        fn delete(&self, key: &str) -> Result<()> {
            self.check("delete", key)?;
            self.inner.delete(key)
        }
    }

    #[test]
    fn test_sets_then_deletes() {
        let store = MemoryStore::new();
        let ops = BatchStoreOperations::new()
            .set("key1", "value1")
            .set("key2", "value2");

        execute_batch_store_operations(&store, &ops).unwrap();
        assert_eq!(store.get("key1").unwrap(), "value1");
        assert_eq!(store.get("key2").unwrap(), "value2");

        let ops = BatchStoreOperations::new().delete("key1");
        execute_batch_store_operations(&store, &ops).unwrap();
        assert!(store.get("key1").unwrap_err().is_not_found());
        assert_eq!(store.get("key2").unwrap(), "value2");
    }

    #[test]
    fn test_empty_batch_is_noop() {
        let store = FlakyStore::failing_on(&["anything"]);
        execute_batch_store_operations(&store, &BatchStoreOperations::new()).unwrap();
        assert!(store.attempts.lock().unwrap().is_empty());
    }

    #[test]
    fn test_continue_on_error_attempts_everything_and_reports_first() {
        let store = FlakyStore::failing_on(&["b", "gone"]);
        let ops = BatchStoreOperations::new()
            .set("a", "1")
            .set("b", "2")
            .set("c", "3")
            .delete("gone")
            .delete("a");

        let err = BatchStoreOperator::new(&store).apply(&ops).unwrap_err();

        assert!(err.to_string().contains("set b rejected"));
        assert_eq!(
            store.attempts.lock().unwrap().as_slice(),
            ["set a", "set b", "set c", "delete gone", "delete a"]
        );
        assert!(store.get("a").is_err());
        assert_eq!(store.get("c").unwrap(), "3");
    }

    #[test]
    fn test_stop_on_first_error_leaves_rest_untouched() {
        let store = FlakyStore::failing_on(&["b"]);
        let ops = BatchStoreOperations::new()
            .set("a", "1")
            .set("b", "2")
            .set("c", "3")
            .delete("a");

        let operator = BatchStoreOperator::new(&store).with_policy(FailurePolicy::StopOnFirstError);
        assert!(operator.apply(&ops).is_err());

        assert_eq!(
            store.attempts.lock().unwrap().as_slice(),
            ["set a", "set b"]
        );
        // 沒有回滾：已套用的 set 仍然存在
        assert_eq!(store.get("a").unwrap(), "1");
        assert!(store.get("c").is_err());
    }

    #[test]
    fn test_deleting_missing_key_is_not_an_error() {
        let store = MemoryStore::new();
        let ops = BatchStoreOperations::new().delete("never-set");
        execute_batch_store_operations(&store, &ops).unwrap();
    }
}
