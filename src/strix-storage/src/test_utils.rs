//! Builders for property tables used in tests and examples.
//!
//! Only available with the `test-utils` feature.

use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Int64Array, StringBuilder, UInt8Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use common_error::{StrixError, StrixResult};

use crate::table::PropertyTable;

/// Builder for property tables with indicator and data columns.
///
/// Columns appear in the schema in the order: `UInt8` indicators, boolean
/// indicators, integer properties, string properties.
pub struct PropertyTableBuilder {
    indicators: Vec<(String, Vec<u8>)>,
    bool_indicators: Vec<(String, Vec<bool>)>,
    int_props: Vec<(String, Vec<Option<i64>>)>,
    string_props: Vec<(String, Vec<Option<String>>)>,
    rows: usize,
}

impl PropertyTableBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            indicators: Vec::new(),
            bool_indicators: Vec::new(),
            int_props: Vec::new(),
            string_props: Vec::new(),
            rows: 0,
        }
    }

    /// Define a `UInt8` indicator column.
    pub fn with_indicator(mut self, name: &str) -> Self {
        self.indicators.push((name.to_string(), Vec::new()));
        self
    }

    /// Define a boolean indicator column.
    pub fn with_bool_indicator(mut self, name: &str) -> Self {
        self.bool_indicators.push((name.to_string(), Vec::new()));
        self
    }

    /// Define an integer property column.
    pub fn with_int_prop(mut self, name: &str) -> Self {
        self.int_props.push((name.to_string(), Vec::new()));
        self
    }

    /// Define a string property column.
    pub fn with_string_prop(mut self, name: &str) -> Self {
        self.string_props.push((name.to_string(), Vec::new()));
        self
    }

    /// Add a row with only indicator values; data properties are null.
    pub fn add_row(&mut self, indicators: &[u8]) {
        self.add_row_with_props(indicators, &[], &[], &[]);
    }

    /// Add a row.
    ///
    /// Values are provided as parallel slices matching the order in which
    /// the columns of each kind were defined. Missing values default to
    /// zero, `false`, or null.
    pub fn add_row_with_props(
        &mut self,
        indicators: &[u8],
        bool_indicators: &[bool],
        int_values: &[Option<i64>],
        string_values: &[Option<&str>],
    ) {
        for (i, col) in self.indicators.iter_mut().enumerate() {
            col.1.push(indicators.get(i).copied().unwrap_or(0));
        }
        for (i, col) in self.bool_indicators.iter_mut().enumerate() {
            col.1.push(bool_indicators.get(i).copied().unwrap_or(false));
        }
        for (i, col) in self.int_props.iter_mut().enumerate() {
            col.1.push(int_values.get(i).copied().flatten());
        }
        for (i, col) in self.string_props.iter_mut().enumerate() {
            col.1
                .push(string_values.get(i).copied().flatten().map(String::from));
        }
        self.rows += 1;
    }

    /// Build the `RecordBatch`.
    pub fn build(self) -> StrixResult<RecordBatch> {
        let mut fields = Vec::new();
        let mut columns: Vec<ArrayRef> = Vec::new();

        for (name, values) in self.indicators {
            fields.push(Field::new(name, DataType::UInt8, true));
            columns.push(Arc::new(UInt8Array::from(values)));
        }
        for (name, values) in self.bool_indicators {
            fields.push(Field::new(name, DataType::Boolean, true));
            columns.push(Arc::new(BooleanArray::from(values)));
        }
        for (name, values) in self.int_props {
            fields.push(Field::new(name, DataType::Int64, true));
            let array: Int64Array = values.into_iter().collect();
            columns.push(Arc::new(array));
        }
        for (name, values) in self.string_props {
            fields.push(Field::new(name, DataType::Utf8, true));
            let mut builder = StringBuilder::new();
            for value in values {
                match value {
                    Some(v) => builder.append_value(&v),
                    None => builder.append_null(),
                }
            }
            columns.push(Arc::new(builder.finish()));
        }

        RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
            .map_err(|e| StrixError::schema_error(format!("Failed to build property batch: {e}")))
    }

    /// Build a single-chunk `PropertyTable`.
    pub fn build_table(self) -> StrixResult<PropertyTable> {
        Ok(PropertyTable::from_batch(self.build()?))
    }

    /// Number of rows added.
    pub fn len(&self) -> usize {
        self.rows
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

impl Default for PropertyTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}
