//! Columnar property table consumed by entity-type discovery.

use arrow::array::ArrayRef;
use arrow::datatypes::{Schema, SchemaRef};
use arrow::record_batch::RecordBatch;

use common_error::{StrixError, StrixResult};

/// A property table: one Arrow schema and the `RecordBatch` chunks holding
/// its rows.
///
/// Each batch is one physical chunk of every column. Discovery only accepts
/// tables whose columns live in at most one chunk.
#[derive(Debug, Clone)]
pub struct PropertyTable {
    schema: SchemaRef,
    chunks: Vec<RecordBatch>,
}

impl PropertyTable {
    /// Create an empty table with the given schema.
    pub fn new(schema: SchemaRef) -> Self {
        Self {
            schema,
            chunks: Vec::new(),
        }
    }

    /// Create a table holding a single chunk.
    pub fn from_batch(batch: RecordBatch) -> Self {
        Self {
            schema: batch.schema(),
            chunks: vec![batch],
        }
    }

    /// Create a table from chunks that all share `schema`.
    pub fn try_new(schema: SchemaRef, chunks: Vec<RecordBatch>) -> StrixResult<Self> {
        let mut table = Self::new(schema);
        for chunk in chunks {
            table.add_chunk(chunk)?;
        }
        Ok(table)
    }

    /// Append a chunk.
    pub fn add_chunk(&mut self, chunk: RecordBatch) -> StrixResult<()> {
        if chunk.schema().fields() != self.schema.fields() {
            return Err(StrixError::schema_error(format!(
                "Schema mismatch: expected {:?}, got {:?}",
                self.schema,
                chunk.schema()
            )));
        }
        self.chunks.push(chunk);
        Ok(())
    }

    /// Get the schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Get all chunks.
    pub fn chunks(&self) -> &[RecordBatch] {
        &self.chunks
    }

    /// Number of physical chunks per column.
    pub fn num_chunks(&self) -> usize {
        self.chunks.len()
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.schema.fields().len()
    }

    /// Total row count.
    pub fn num_rows(&self) -> usize {
        self.chunks.iter().map(RecordBatch::num_rows).sum()
    }

    /// Name of column `index`.
    pub fn column_name(&self, index: usize) -> StrixResult<&str> {
        self.schema
            .fields()
            .get(index)
            .map(|f| f.name().as_str())
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Every chunk of column `index`.
    pub fn column_chunks(&self, index: usize) -> StrixResult<Vec<&ArrayRef>> {
        if index >= self.num_columns() {
            return Err(self.out_of_range(index));
        }
        Ok(self.chunks.iter().map(|chunk| chunk.column(index)).collect())
    }

    /// The single chunk of column `index`.
    ///
    /// Returns `None` for a table without chunks and fails with
    /// `NotImplemented` when the column is split across several chunks.
    pub fn column(&self, index: usize) -> StrixResult<Option<&ArrayRef>> {
        let chunks = self.column_chunks(index)?;
        match chunks.as_slice() {
            [] => Ok(None),
            [single] => Ok(Some(*single)),
            _ => Err(StrixError::not_implemented(format!(
                "property column '{}' has {} chunks; only single-chunk columns are supported",
                self.column_name(index)?,
                chunks.len()
            ))),
        }
    }

    fn out_of_range(&self, index: usize) -> StrixError {
        StrixError::invalid_argument(format!(
            "column index {index} is out of range ({} columns)",
            self.num_columns()
        ))
    }
}
