//! Classification and typed views of indicator columns.

use arrow::array::{Array, ArrayRef, BooleanArray, UInt8Array};
use arrow::datatypes::DataType;

use common_config::IndicatorTypes;
use common_error::{StrixError, StrixResult};

/// Whether a column of `data_type` is an entity-type indicator under `accepted`.
pub fn is_indicator_type(data_type: &DataType, accepted: IndicatorTypes) -> bool {
    match data_type {
        DataType::UInt8 => true,
        DataType::Boolean => accepted.accepts_bool(),
        _ => false,
    }
}

/// Typed view of one indicator column.
///
/// A row carries the type when its value is non-zero (or `true`); nulls
/// count as absent.
#[derive(Debug, Clone, Copy)]
pub enum IndicatorColumn<'a> {
    /// `UInt8` flags.
    UInt8(&'a UInt8Array),
    /// Boolean flags.
    Bool(&'a BooleanArray),
}

impl<'a> IndicatorColumn<'a> {
    /// View `array` as an indicator column.
    pub fn try_new(array: &'a ArrayRef) -> StrixResult<Self> {
        let any = array.as_any();
        if let Some(flags) = any.downcast_ref::<UInt8Array>() {
            return Ok(Self::UInt8(flags));
        }
        if let Some(flags) = any.downcast_ref::<BooleanArray>() {
            return Ok(Self::Bool(flags));
        }
        Err(StrixError::schema_error(format!(
            "{} is not an indicator column type",
            array.data_type()
        )))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            Self::UInt8(flags) => flags.len(),
            Self::Bool(flags) => flags.len(),
        }
    }

    /// Check if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether row `row` carries this column's type.
    pub fn is_set(&self, row: usize) -> bool {
        match self {
            Self::UInt8(flags) => flags.is_valid(row) && flags.value(row) != 0,
            Self::Bool(flags) => flags.is_valid(row) && flags.value(row),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::Int64Array;

    use super::*;

    #[test]
    fn test_indicator_type_classification() {
        assert!(is_indicator_type(&DataType::UInt8, IndicatorTypes::UInt8));
        assert!(!is_indicator_type(&DataType::Boolean, IndicatorTypes::UInt8));
        assert!(is_indicator_type(&DataType::Boolean, IndicatorTypes::BoolOrUInt8));
        assert!(!is_indicator_type(&DataType::Int64, IndicatorTypes::BoolOrUInt8));
        assert!(!is_indicator_type(&DataType::UInt16, IndicatorTypes::UInt8));
    }

    #[test]
    fn test_uint8_view() {
        let array: ArrayRef = Arc::new(UInt8Array::from(vec![Some(1), Some(0), None, Some(7)]));
        let column = IndicatorColumn::try_new(&array).unwrap();

        assert_eq!(column.len(), 4);
        assert!(column.is_set(0));
        assert!(!column.is_set(1));
        assert!(!column.is_set(2));
        assert!(column.is_set(3));
    }

    #[test]
    fn test_bool_view() {
        let array: ArrayRef = Arc::new(BooleanArray::from(vec![Some(true), None, Some(false)]));
        let column = IndicatorColumn::try_new(&array).unwrap();

        assert!(column.is_set(0));
        assert!(!column.is_set(1));
        assert!(!column.is_set(2));
    }

    #[test]
    fn test_non_indicator_rejected() {
        let array: ArrayRef = Arc::new(Int64Array::from(vec![1]));
        assert!(matches!(
            IndicatorColumn::try_new(&array),
            Err(StrixError::SchemaError(_))
        ));
    }
}
