//! Device addresses and the row-major cell address calculation.
//!
//! A RAM table occupies a contiguous block starting at its origin. Cells are laid out
//! row by row, each `cell_size` bytes wide, so the cell at `(row, column)` lives at
//!
//! ```text
//! origin + (row * columns + column) * cell_size
//! ```
//!
//! All arithmetic is checked. A table whose cells would not fit in the 32-bit device
//! address space is rejected with [`crate::Error::AddressOverflow`] instead of wrapping
//! around to an unrelated memory location.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// An address in the device's 32-bit memory space.
///
/// Rendered at the transport boundary as `0x` followed by upper-case hex digits, e.g.
/// `0xFF1234`. Parsing accepts the same form, with or without the `0x` prefix.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DeviceAddress(pub u32);

impl DeviceAddress {
    /// Creates a new address from its raw value
    #[must_use]
    pub fn new(value: u32) -> Self {
        DeviceAddress(value)
    }

    /// Returns the raw address value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Returns the address `bytes` past this one, or `None` on overflow
    #[must_use]
    pub fn offset(&self, bytes: u32) -> Option<DeviceAddress> {
        self.0.checked_add(bytes).map(DeviceAddress)
    }
}

impl From<u32> for DeviceAddress {
    fn from(value: u32) -> Self {
        DeviceAddress(value)
    }
}

impl From<DeviceAddress> for u32 {
    fn from(address: DeviceAddress) -> Self {
        address.0
    }
}

impl fmt::Debug for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeviceAddress(0x{:X})", self.0)
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

impl FromStr for DeviceAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        // from_str_radix alone would let a sign through, e.g. "0x+10"
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidAddress(format!("'{s}': not a hex address")));
        }

        u32::from_str_radix(digits, 16)
            .map(DeviceAddress)
            .map_err(|e| Error::InvalidAddress(format!("'{s}': {e}")))
    }
}

/// Computes the device address of cell `(row, column)` of a row-major table.
///
/// ## Arguments
/// * `origin`    - Address of cell `(0, 0)`
/// * `cell_size` - Width of one cell in bytes
/// * `row`       - Row of the cell
/// * `column`    - Column of the cell, expected to be below `columns`
/// * `columns`   - Number of columns in the table
///
/// # Errors
/// Returns [`Error::AddressOverflow`] if the address, or the last byte of the cell,
/// does not fit into the 32-bit address space.
pub fn cell_address(
    origin: DeviceAddress,
    cell_size: u32,
    row: u32,
    column: u32,
    columns: u32,
) -> Result<DeviceAddress> {
    let overflow = || Error::AddressOverflow {
        origin,
        row,
        column,
    };

    let index = row
        .checked_mul(columns)
        .and_then(|base| base.checked_add(column))
        .ok_or_else(overflow)?;
    let address = index
        .checked_mul(cell_size)
        .and_then(|delta| origin.offset(delta))
        .ok_or_else(overflow)?;

    // The whole cell has to be addressable, not just its first byte
    if cell_size > 0 && address.offset(cell_size - 1).is_none() {
        return Err(overflow());
    }

    Ok(address)
}
