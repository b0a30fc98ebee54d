use std::sync::{Arc, Mutex, MutexGuard};

use rowmap_data::{DataError, DataResult, Statement, StatementExecutor, StatementKind};
use serde_json::Value;

/// In-memory executor that records every statement it receives.
///
/// Clones share the same log, so a handle kept by the test still sees the
/// statements dispatched through a repository that owns another clone.
#[derive(Debug, Clone, Default)]
pub struct RecordingExecutor {
    log: Arc<Mutex<Vec<Statement>>>,
    rows: u64,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `rows` affected rows for every statement instead of zero.
    pub fn with_rows(mut self, rows: u64) -> Self {
        self.rows = rows;
        self
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Statement>> {
        self.log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of every recorded statement, oldest first.
    pub fn statements(&self) -> Vec<Statement> {
        self.lock().clone()
    }

    /// SQL text of every recorded statement, oldest first.
    pub fn sql(&self) -> Vec<String> {
        self.lock().iter().map(|s| s.sql.clone()).collect()
    }

    pub fn last(&self) -> Option<Statement> {
        self.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn count(&self, kind: StatementKind) -> usize {
        self.lock().iter().filter(|s| s.kind == kind).count()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Recorded statements as a JSON array of `{kind, sql, params}` objects.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(&*self.lock()).unwrap_or(Value::Null)
    }
}

impl StatementExecutor for RecordingExecutor {
    async fn execute(&self, statement: &Statement) -> DataResult<u64> {
        self.lock().push(statement.clone());
        Ok(self.rows)
    }
}

/// Executor that rejects every statement with an execution error.
#[derive(Debug, Clone)]
pub struct FailingExecutor {
    message: String,
}

impl FailingExecutor {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl StatementExecutor for FailingExecutor {
    async fn execute(&self, _statement: &Statement) -> DataResult<u64> {
        Err(DataError::execution(std::io::Error::other(self.message.clone())))
    }
}
