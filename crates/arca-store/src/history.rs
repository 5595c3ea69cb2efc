use serde::{Deserialize, Serialize};

/// Operations recorded by tracked backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Save,
    Load,
    Delete,
}

impl Operation {
    /// Label written into history records.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Save => "Salvar",
            Self::Load => "Carregar",
            Self::Delete => "Excluir",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single audit trail entry: which operation touched which name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Operation label, e.g. `"Salvar"`.
    pub operation: String,
    /// Entry name the operation was applied to.
    pub name: String,
}

impl HistoryRecord {
    pub fn new(operation: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for HistoryRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.operation, self.name)
    }
}

/// Append-only operation history.
///
/// Records are never removed, reordered or deduplicated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OperationHistory {
    records: Vec<HistoryRecord>,
}

impl OperationHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn push(&mut self, record: HistoryRecord) {
        self.records.push(record);
    }

    /// All records in append order.
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over rendered `"{operation} - {name}"` lines.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.records.iter().map(ToString::to_string)
    }
}
