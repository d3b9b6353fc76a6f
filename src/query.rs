//! Query descriptors and their row-grouped batches.
//!
//! The device cannot return a whole table in one transaction, so the queries of a
//! table are handed out one row at a time. Every [`RowBatch`] starts with an explicit
//! [`RowSlot::Header`] placeholder, reserved for the row header value (e.g. the RPM
//! range) that the display layer supplies from elsewhere, followed by one
//! [`RowSlot::Query`] per column.
//!
//! # Layout
//!
//! ```text
//! row 0: [Header, r0c0, r0c1, ..., r0c{n-1}]
//! row 1: [Header, r1c0, r1c1, ..., r1c{n-1}]
//! ...
//! ```
//!
//! The transport layer must skip the header slot when issuing queries;
//! [`RowBatch::queries`] does exactly that. If a row holds more queries than the
//! device buffer accepts, the transport subdivides the row further.

use std::fmt;

use crate::{address::DeviceAddress, converter::ConverterRef};

/// An immutable request to read and interpret one table cell.
#[derive(Clone)]
pub struct QueryDescriptor {
    id: String,
    address: DeviceAddress,
    size: u32,
    converter: ConverterRef,
}

impl QueryDescriptor {
    /// Creates a new descriptor
    ///
    /// ## Arguments
    /// * `id`        - Identifier, stable across regenerations of the same table
    /// * `address`   - Device address of the cell
    /// * `size`      - Number of bytes to read
    /// * `converter` - Converter shared by all cells of the table
    pub fn new(id: String, address: DeviceAddress, size: u32, converter: ConverterRef) -> Self {
        QueryDescriptor {
            id,
            address,
            size,
            converter,
        }
    }

    /// Identifier of the query
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Device address of the cell
    #[must_use]
    pub fn address(&self) -> DeviceAddress {
        self.address
    }

    /// The address in the device's hex notation, e.g. `0xFF1234`
    #[must_use]
    pub fn address_string(&self) -> String {
        self.address.to_string()
    }

    /// Number of bytes to read
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// First address past the cell, `None` if the cell ends at the top of the address space
    #[must_use]
    pub fn end(&self) -> Option<DeviceAddress> {
        self.address.offset(self.size)
    }

    /// Converter for the raw cell bytes
    #[must_use]
    pub fn converter(&self) -> &ConverterRef {
        &self.converter
    }
}

impl fmt::Debug for QueryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryDescriptor")
            .field("id", &self.id)
            .field("address", &self.address)
            .field("size", &self.size)
            .field("units", &self.converter.units())
            .finish()
    }
}

/// One slot of a [`RowBatch`].
#[derive(Clone, Debug)]
pub enum RowSlot {
    /// Reserved for the externally supplied row header, never a live query
    Header,
    /// Query for one cell of the row
    Query(QueryDescriptor),
}

impl RowSlot {
    /// Returns true if this is the header placeholder
    #[must_use]
    pub fn is_header(&self) -> bool {
        matches!(self, RowSlot::Header)
    }

    /// Returns the query of this slot, if any
    #[must_use]
    pub fn as_query(&self) -> Option<&QueryDescriptor> {
        match self {
            RowSlot::Header => None,
            RowSlot::Query(query) => Some(query),
        }
    }
}

/// The queries of one table row, preceded by the header placeholder.
#[derive(Clone, Debug)]
pub struct RowBatch {
    row: u32,
    slots: Vec<RowSlot>,
}

impl RowBatch {
    /// Creates a batch for `row` holding `queries` in column order.
    ///
    /// The header placeholder is inserted as slot 0.
    pub fn new(row: u32, queries: Vec<QueryDescriptor>) -> Self {
        let mut slots = Vec::with_capacity(queries.len() + 1);
        slots.push(RowSlot::Header);
        slots.extend(queries.into_iter().map(RowSlot::Query));

        RowBatch { row, slots }
    }

    /// Table row this batch samples
    #[must_use]
    pub fn row(&self) -> u32 {
        self.row
    }

    /// All slots, header placeholder included
    #[must_use]
    pub fn slots(&self) -> &[RowSlot] {
        &self.slots
    }

    /// Number of slots, i.e. the column count plus one
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false, a batch carries at least its header slot
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The live queries of this row in column order, header excluded
    pub fn queries(&self) -> impl Iterator<Item = &QueryDescriptor> + '_ {
        self.slots.iter().filter_map(RowSlot::as_query)
    }

    /// The query for `column`, if in range
    #[must_use]
    pub fn query(&self, column: usize) -> Option<&QueryDescriptor> {
        column
            .checked_add(1)
            .and_then(|slot| self.slots.get(slot))
            .and_then(RowSlot::as_query)
    }

    /// First address and total byte length covered by this row.
    ///
    /// The length is a `u64`, a single row may cover the entire 32-bit address space.
    #[must_use]
    pub fn span(&self) -> Option<(DeviceAddress, u64)> {
        let first = self.queries().next()?;
        let bytes = self.queries().map(|query| u64::from(query.size())).sum();
        Some((first.address(), bytes))
    }
}

/// All row batches of a table, in row order.
#[derive(Clone, Debug, Default)]
pub struct TableBatches {
    batches: Vec<RowBatch>,
}

impl TableBatches {
    /// Wraps an ordered list of row batches
    pub fn new(batches: Vec<RowBatch>) -> Self {
        TableBatches { batches }
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    /// Returns true if there are no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// All row batches
    #[must_use]
    pub fn rows(&self) -> &[RowBatch] {
        &self.batches
    }

    /// The batch of row `row`, if in range
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&RowBatch> {
        self.batches.get(row)
    }

    /// Iterates over the row batches
    pub fn iter(&self) -> std::slice::Iter<'_, RowBatch> {
        self.batches.iter()
    }

    /// All live queries in row-major order, header slots excluded
    pub fn queries(&self) -> impl Iterator<Item = &QueryDescriptor> + '_ {
        self.batches.iter().flat_map(|batch| batch.queries())
    }

    /// Total number of live queries
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.batches.iter().map(|batch| batch.len() - 1).sum()
    }
}

impl IntoIterator for TableBatches {
    type Item = RowBatch;
    type IntoIter = std::vec::IntoIter<RowBatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.batches.into_iter()
    }
}

impl<'a> IntoIterator for &'a TableBatches {
    type Item = &'a RowBatch;
    type IntoIter = std::slice::Iter<'a, RowBatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.batches.iter()
    }
}
