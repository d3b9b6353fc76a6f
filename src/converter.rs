//! Capabilities injected by the surrounding logger.
//!
//! Query generation never interprets cell values itself. It only needs two things
//! from the logged parameter a table is sampled for:
//!
//! - a [`UnitConverter`], shared verbatim by every query of the table, and
//! - the cell width, resolved once from the converter's [`DataType`].
//!
//! Both are expressed as traits so the logger can hand in its own parameter types.
//! [`LinearConverter`] and [`LoggerParameter`] are ready-made implementations for the
//! common case of a scaled integer quantity.

use std::fmt;
use std::sync::Arc;

use crate::{datatype::DataType, Result};

/// Turns the raw bytes of one cell into an engineering-unit value.
///
/// Implementations must be immutable after construction. A single converter is
/// aliased by every [`crate::QueryDescriptor`] of a table, potentially across threads.
pub trait UnitConverter: fmt::Debug + Send + Sync {
    /// Engineering unit of the converted value, e.g. `%` or `rpm`
    fn units(&self) -> &str;

    /// Storage type of the raw cell
    fn data_type(&self) -> DataType;

    /// Converts the raw big-endian bytes of one cell.
    ///
    /// # Errors
    /// Returns an error if `raw` does not hold a complete cell.
    fn convert(&self, raw: &[u8]) -> Result<f64>;
}

/// Shared, read-only reference to a converter
pub type ConverterRef = Arc<dyn UnitConverter>;

/// A converter computing `raw * scale + offset`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearConverter {
    units: String,
    data_type: DataType,
    scale: f64,
    offset: f64,
}

impl LinearConverter {
    /// Creates a new linear converter
    ///
    /// ## Arguments
    /// * `units`     - Engineering unit of the result
    /// * `data_type` - Storage type of the raw cell
    /// * `scale`     - Factor applied to the raw value
    /// * `offset`    - Constant added after scaling
    pub fn new(units: impl Into<String>, data_type: DataType, scale: f64, offset: f64) -> Self {
        LinearConverter {
            units: units.into(),
            data_type,
            scale,
            offset,
        }
    }

    /// Factor applied to the raw value
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Constant added after scaling
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }
}

impl UnitConverter for LinearConverter {
    fn units(&self) -> &str {
        &self.units
    }

    fn data_type(&self) -> DataType {
        self.data_type
    }

    fn convert(&self, raw: &[u8]) -> Result<f64> {
        Ok(self.data_type.decode(raw)? * self.scale + self.offset)
    }
}

/// The logged quantity a RAM table is sampled for.
pub trait DataSource {
    /// Identifier of the logged parameter
    fn id(&self) -> &str;

    /// Converter selected for the parameter
    fn converter(&self) -> ConverterRef;

    /// Byte width of one table cell, derived from the converter's data type.
    ///
    /// # Errors
    /// Implementations that look the width up elsewhere may fail; the provided
    /// implementation does not.
    fn cell_size(&self) -> Result<u32> {
        Ok(self.converter().data_type().width())
    }
}

/// A logged parameter together with its selected converter.
#[derive(Clone, Debug)]
pub struct LoggerParameter {
    id: String,
    name: String,
    converter: ConverterRef,
}

impl LoggerParameter {
    /// Creates a new parameter
    pub fn new(id: impl Into<String>, name: impl Into<String>, converter: ConverterRef) -> Self {
        LoggerParameter {
            id: id.into(),
            name: name.into(),
            converter,
        }
    }

    /// Human readable name of the parameter
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl DataSource for LoggerParameter {
    fn id(&self) -> &str {
        &self.id
    }

    fn converter(&self) -> ConverterRef {
        Arc::clone(&self.converter)
    }
}
