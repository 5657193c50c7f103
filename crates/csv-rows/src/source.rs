use std::convert::Infallible;

use row_core::MemoryRow;

/// Anything that can produce a batch of rows.
pub trait RowSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read all rows, in source order.
    fn read_rows(&self) -> Result<Vec<MemoryRow>, Self::Error>;
}

/// Fixed, in-memory rows.
#[derive(Debug, Clone, Default)]
pub struct MemoryRowSource {
    rows: Vec<MemoryRow>,
}

impl MemoryRowSource {
    pub fn new(rows: Vec<MemoryRow>) -> Self {
        Self { rows }
    }
}

impl RowSource for MemoryRowSource {
    type Error = Infallible;

    fn read_rows(&self) -> Result<Vec<MemoryRow>, Self::Error> {
        Ok(self.rows.clone())
    }
}

impl<S: RowSource + ?Sized> RowSource for &S {
    type Error = S::Error;

    fn read_rows(&self) -> Result<Vec<MemoryRow>, Self::Error> {
        (**self).read_rows()
    }
}
