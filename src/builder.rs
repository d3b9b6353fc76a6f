//! Query generation for RAM tables.
//!
//! [`build_queries`] turns a [`TableSpec`] into the [`TableBatches`] a transport layer
//! issues row by row. The pass is pure: it performs no I/O, holds no state between
//! calls, and produces identical ids and addresses for identical input. Two specs can
//! therefore be generated concurrently, which [`build_tables`] does for a whole set of
//! tables at once.
//!
//! # Examples
//!
//! ```rust
//! use ramtable::prelude::*;
//! use std::sync::Arc;
//!
//! let converter: ConverterRef = Arc::new(LinearConverter::new("%", DataType::Uint16, 0.01, 0.0));
//! let parameter = LoggerParameter::new("E70", "LTFT", converter);
//!
//! let spec = TableSpec::from_source(DeviceAddress::new(0x1000), 2, 3, &parameter)?;
//! let batches = build_queries(&spec)?;
//!
//! assert_eq!(batches.len(), 2);
//! assert_eq!(batches.rows()[1].query(2).unwrap().address_string(), "0x100A");
//! # Ok::<(), ramtable::Error>(())
//! ```

use std::sync::Arc;

use rayon::prelude::*;

use crate::{
    address::{cell_address, DeviceAddress},
    converter::{ConverterRef, DataSource},
    query::{QueryDescriptor, RowBatch, TableBatches},
    Result,
};

/// Placement and format of one RAM table.
///
/// Borrowed by [`build_queries`] for the duration of a single generation pass.
#[derive(Clone, Debug)]
pub struct TableSpec {
    /// Address of cell `(0, 0)`
    pub origin: DeviceAddress,
    /// Number of rows
    pub rows: u32,
    /// Number of columns
    pub columns: u32,
    /// Width of one cell in bytes
    pub cell_size: u32,
    /// Converter shared by every cell of the table
    pub converter: ConverterRef,
    /// Prefix of every query id, distinguishes tables sharing one address space
    pub id_prefix: String,
    /// Id of the logged parameter the table was resolved from, if any
    pub source_id: Option<String>,
}

impl TableSpec {
    /// Creates a spec from explicit values
    ///
    /// ## Arguments
    /// * `origin`    - Address of cell `(0, 0)`
    /// * `rows`      - Number of rows
    /// * `columns`   - Number of columns
    /// * `cell_size` - Width of one cell in bytes
    /// * `converter` - Converter shared by every cell
    pub fn new(
        origin: DeviceAddress,
        rows: u32,
        columns: u32,
        cell_size: u32,
        converter: ConverterRef,
    ) -> Self {
        TableSpec {
            origin,
            rows,
            columns,
            cell_size,
            converter,
            id_prefix: String::new(),
            source_id: None,
        }
    }

    /// Creates a spec for the table sampled for `source`.
    ///
    /// The cell width is resolved once from the source, before any query is built.
    ///
    /// # Errors
    /// Returns an error if the source cannot report its cell width.
    pub fn from_source(
        origin: DeviceAddress,
        rows: u32,
        columns: u32,
        source: &dyn DataSource,
    ) -> Result<Self> {
        let mut spec = Self::new(
            origin,
            rows,
            columns,
            source.cell_size()?,
            source.converter(),
        );
        spec.source_id = Some(source.id().to_string());
        Ok(spec)
    }

    /// Sets the prefix of the generated query ids, e.g. `flkc-`
    #[must_use]
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Number of cells in the table, `None` if it exceeds `u32`
    #[must_use]
    pub fn cell_count(&self) -> Option<u32> {
        self.rows.checked_mul(self.columns)
    }

    /// Checks that the table can be generated at all.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidSpec`] for zero rows, columns or cell width and
    /// [`crate::Error::AddressOverflow`] if the last cell of the table does not fit into
    /// the address space.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 {
            return Err(invalid_spec!("row count must be positive"));
        }
        if self.columns == 0 {
            return Err(invalid_spec!("column count must be positive"));
        }
        if self.cell_size == 0 {
            return Err(invalid_spec!("cell data size must be positive"));
        }

        // Addresses grow monotonically, the last cell bounds the whole table
        cell_address(
            self.origin,
            self.cell_size,
            self.rows - 1,
            self.columns - 1,
            self.columns,
        )?;

        Ok(())
    }
}

/// Builds the identifier of the query for cell `(row, column)`.
///
/// ```rust
/// use ramtable::cell_id;
///
/// assert_eq!(cell_id("", 1, 2), "r1c2");
/// assert_eq!(cell_id("flkc-", 0, 3), "flkc-r0c3");
/// ```
#[must_use]
pub fn cell_id(prefix: &str, row: u32, column: u32) -> String {
    format!("{prefix}r{row}c{column}")
}

/// Generates the row-grouped queries for every cell of a table.
///
/// Each of the `rows` batches holds `columns + 1` slots: the header placeholder
/// followed by one query per column, in the device's row-major memory order.
///
/// # Errors
/// Returns [`crate::Error::InvalidSpec`] or [`crate::Error::AddressOverflow`] before
/// any batch is produced, see [`TableSpec::validate`].
pub fn build_queries(spec: &TableSpec) -> Result<TableBatches> {
    spec.validate()?;

    tracing::debug!(
        rows = spec.rows,
        columns = spec.columns,
        cell_size = spec.cell_size,
        origin = %spec.origin,
        prefix = %spec.id_prefix,
        source = spec.source_id.as_deref().unwrap_or("-"),
        "generating RAM table queries"
    );

    let mut batches = Vec::with_capacity(spec.rows as usize);
    for row in 0..spec.rows {
        let mut queries = Vec::with_capacity(spec.columns as usize);
        for column in 0..spec.columns {
            let address = cell_address(spec.origin, spec.cell_size, row, column, spec.columns)?;
            tracing::trace!(row, column, address = %address, "table cell");

            queries.push(QueryDescriptor::new(
                cell_id(&spec.id_prefix, row, column),
                address,
                spec.cell_size,
                Arc::clone(&spec.converter),
            ));
        }
        batches.push(RowBatch::new(row, queries));
    }

    Ok(TableBatches::new(batches))
}

/// Generates several independent tables in parallel.
///
/// The output is in the order of `specs`.
///
/// # Errors
/// Returns the error of the first spec, in input order, that fails to generate.
pub fn build_tables(specs: &[TableSpec]) -> Result<Vec<TableBatches>> {
    let results: Vec<Result<TableBatches>> = specs.par_iter().map(build_queries).collect();
    results.into_iter().collect()
}
