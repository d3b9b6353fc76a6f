// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # ramtable
//!
//! Address and query generation for sampling two-dimensional tables that live in an
//! engine control unit's RAM, such as the adaptive fuel trim (LTFT) or fine learning
//! knock correction (FLKC) tables.
//!
//! The ECU cannot be asked for a whole table in one transaction, its communication
//! buffer is too small. `ramtable` therefore computes the address of every cell,
//! wraps each one in an immutable [`QueryDescriptor`], and groups the descriptors
//! into one [`RowBatch`] per table row, which the transport layer issues separately.
//!
//! ## Quick Start
//!
//! ```rust
//! use ramtable::prelude::*;
//! use std::sync::Arc;
//!
//! let converter: ConverterRef = Arc::new(LinearConverter::new("%", DataType::Uint16, 0.01, 0.0));
//! let spec = TableSpec::new(DeviceAddress::new(0x1000), 2, 3, 2, converter);
//!
//! let batches = build_queries(&spec)?;
//! for batch in &batches {
//!     // Slot 0 is the row header placeholder, only the queries go on the wire
//!     for query in batch.queries() {
//!         println!("{} @ {} ({} bytes)", query.id(), query.address_string(), query.size());
//!     }
//! }
//! # Ok::<(), ramtable::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`address`] - Device addresses and the row-major cell address calculation
//! - [`datatype`] - Cell storage types, their widths and raw decoding
//! - [`converter`] - The converter and data source capabilities injected by the logger
//! - [`query`] - Query descriptors, row batches and the header placeholder
//! - [`builder`] - Table specs and the query generation pass
//! - [`config`] - Table definitions as found in configuration files
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Addressing
//!
//! Cells are stored contiguously in row-major order, so cell `(row, column)` of a table
//! with `columns` columns and `cell_size` byte wide cells is found at
//! `origin + (row * columns + column) * cell_size`. The arithmetic is checked: a table
//! reaching past the 32-bit address space is rejected with [`Error::AddressOverflow`]
//! instead of silently wrapping to an unrelated location.
//!
//! ## Diagnostics
//!
//! Generation emits [`tracing`] events: one `debug` record per table and one `trace`
//! record per cell with its row, column and address. No subscriber is installed by
//! this crate.
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, Error>`](Result). Generation fails fast,
//! either the complete [`TableBatches`] is returned or nothing is:
//!
//! ```rust
//! use ramtable::{prelude::*, Error};
//! use std::sync::Arc;
//!
//! let converter: ConverterRef = Arc::new(LinearConverter::new("%", DataType::Uint8, 1.0, 0.0));
//! let spec = TableSpec::new(DeviceAddress::new(0xFFFF_FFFF), 1, 2, 1, converter);
//!
//! match build_queries(&spec) {
//!     Err(Error::AddressOverflow { row, column, .. }) => println!("cell r{row}c{column} overflows"),
//!     Err(e) => println!("other error: {e}"),
//!     Ok(_) => unreachable!(),
//! }
//! ```

#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use ramtable::prelude::*;
///
/// let address: DeviceAddress = "0xFF6A10".parse()?;
/// assert_eq!(address.value(), 0xFF_6A10);
/// # Ok::<(), ramtable::Error>(())
/// ```
pub mod prelude;

/// Device addresses and the row-major cell address calculation.
pub mod address;

/// Bounds-checked big-endian readers for raw cell data.
pub mod io;

/// Cell storage types.
///
/// The [`datatype::DataType`] of the logged quantity determines the width of a cell
/// and how its raw bytes are decoded.
pub mod datatype;

/// Converter and data source capabilities.
pub mod converter;

/// Query descriptors and their row-grouped batches.
pub mod query;

/// Table specs and query generation.
pub mod builder;

/// Table definitions from configuration files.
pub mod config;

/// `ramtable` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always
/// [`Error`]. This is used consistently throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// `ramtable` Error type
///
/// The main error type for all operations in this crate. Table definition problems
/// are reported as configuration errors, never as transient communication failures.
pub use error::Error;

pub use address::{cell_address, DeviceAddress};
pub use builder::{build_queries, build_tables, cell_id, TableSpec};
pub use config::TableDefinition;
pub use converter::{ConverterRef, DataSource, LinearConverter, LoggerParameter, UnitConverter};
pub use datatype::DataType;
pub use query::{QueryDescriptor, RowBatch, RowSlot, TableBatches};
