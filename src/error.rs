use thiserror::Error;

use crate::address::DeviceAddress;

macro_rules! invalid_spec {
    // Single string version
    ($msg:expr) => {
        crate::Error::InvalidSpec {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::InvalidSpec {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Query generation is a pure, fail-fast pass: every variant is raised before any
/// [`crate::TableBatches`] value is handed out, so a caller never observes partial output.
///
/// # Error Categories
///
/// ## Table Definition Errors
/// - [`Error::InvalidSpec`] - Zero rows, columns or cell width
/// - [`Error::AddressOverflow`] - A cell would fall outside the 32-bit device address space
/// - [`Error::InvalidAddress`] - An address string could not be parsed
/// - [`Error::UnknownDataType`] - A data type name is not recognized
/// - [`Error::Config`] - A table definition document could not be deserialized
///
/// ## Decoding Errors
/// - [`Error::OutOfBounds`] - Too few raw bytes for the requested cell type
///
/// All of the table definition errors are configuration errors of the table, not
/// transient communication failures, and should be surfaced as such.
///
/// # Examples
///
/// ```rust
/// use ramtable::{prelude::*, Error};
/// use std::sync::Arc;
///
/// let converter: ConverterRef = Arc::new(LinearConverter::new("%", DataType::Uint8, 1.0, 0.0));
/// let spec = TableSpec::new(DeviceAddress::new(0x1000), 0, 4, 1, converter);
///
/// match build_queries(&spec) {
///     Err(Error::InvalidSpec { message, .. }) => println!("bad table: {}", message),
///     Err(e) => println!("other error: {}", e),
///     Ok(_) => unreachable!(),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The table definition cannot produce any queries.
    ///
    /// Raised when the row count, the column count or the resolved cell width is zero.
    /// The error includes the source location where the condition was detected.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of the offending parameter
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Invalid table spec - {file}:{line}: {message}")]
    InvalidSpec {
        /// The message to be printed for the InvalidSpec error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// The address of a cell does not fit in the device address space.
    ///
    /// Wrapping silently would produce a query for an unrelated memory location,
    /// so the overflowing cell is reported instead.
    #[error("Address of cell r{row}c{column} overflows the address space (origin {origin})")]
    AddressOverflow {
        /// Origin address of the table
        origin: DeviceAddress,
        /// Row of the offending cell
        row: u32,
        /// Column of the offending cell
        column: u32,
    },

    /// An address string is not valid hexadecimal.
    #[error("Invalid device address - {0}")]
    InvalidAddress(String),

    /// The named data type is not known.
    #[error("Unknown data type - {0}")]
    UnknownDataType(String),

    /// An out of bound access was attempted while decoding raw cell data.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// A table definition document could not be parsed.
    #[error("{0}")]
    Config(#[from] serde_json::Error),
}
