/// Named-column access to one row of tabular storage.
///
/// Mappers walk the columns a row actually carries, so a missing column is
/// never read. Whatever error the accessor raises for a read it cannot satisfy
/// is handed back to the caller untouched.
pub trait RowSource {
    type Error;

    fn column_count(&self) -> usize;

    fn column_name(&self, index: usize) -> Result<&str, Self::Error>;

    fn get_i64(&self, index: usize) -> Result<i64, Self::Error>;

    fn get_string(&self, index: usize) -> Result<Option<String>, Self::Error>;

    /// Keeps the low 32 bits. ARGB colors may be stored unsigned, so
    /// `0xFFFF0000` reads back as the same color as `-65536`.
    fn get_i32(&self, index: usize) -> Result<i32, Self::Error> {
        self.get_i64(index).map(|value| value as i32)
    }

    /// 0/1 integer columns; only `1` reads as true.
    fn get_flag(&self, index: usize) -> Result<bool, Self::Error> {
        self.get_i64(index).map(|value| value == 1)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RowValue {
    Null,
    Integer(i64),
    Text(String),
}

impl From<i64> for RowValue {
    fn from(value: i64) -> Self {
        RowValue::Integer(value)
    }
}

impl From<i32> for RowValue {
    fn from(value: i32) -> Self {
        RowValue::Integer(i64::from(value))
    }
}

impl From<&str> for RowValue {
    fn from(value: &str) -> Self {
        RowValue::Text(value.to_owned())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RowError {
    IndexOutOfRange(usize),
    TypeMismatch { column: String, expected: &'static str },
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowError::IndexOutOfRange(index) => write!(f, "column index {index} out of range"),
            RowError::TypeMismatch { column, expected } => {
                write!(f, "column {column} does not hold {expected}")
            }
        }
    }
}

impl std::error::Error for RowError {}

/// A detached row, used where no database cursor is involved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryRow {
    columns: Vec<(String, RowValue)>,
}

impl MemoryRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: &str, value: impl Into<RowValue>) -> Self {
        self.columns.push((column.to_owned(), value.into()));
        self
    }

    fn value(&self, index: usize) -> Result<&(String, RowValue), RowError> {
        self.columns
            .get(index)
            .ok_or(RowError::IndexOutOfRange(index))
    }
}

impl RowSource for MemoryRow {
    type Error = RowError;

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn column_name(&self, index: usize) -> Result<&str, RowError> {
        self.value(index).map(|(name, _)| name.as_str())
    }

    fn get_i64(&self, index: usize) -> Result<i64, RowError> {
        match self.value(index)? {
            (_, RowValue::Integer(value)) => Ok(*value),
            (column, _) => Err(RowError::TypeMismatch {
                column: column.clone(),
                expected: "an integer",
            }),
        }
    }

    fn get_string(&self, index: usize) -> Result<Option<String>, RowError> {
        match self.value(index)? {
            (_, RowValue::Null) => Ok(None),
            (_, RowValue::Text(value)) => Ok(Some(value.clone())),
            (_, RowValue::Integer(value)) => Ok(Some(value.to_string())),
        }
    }
}
