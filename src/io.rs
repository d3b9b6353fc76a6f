//! Bounds-checked big-endian readers for raw cell data.
//!
//! ECU RAM is read back as a plain byte buffer in the device's byte order, which is
//! big-endian for the controllers this crate targets. The [`RawIO`] trait gives every
//! primitive cell type a uniform way to be decoded from such a buffer, and
//! [`read_be`] / [`read_be_at`] perform the bounds checks so callers never slice past
//! the end of a response.
//!
//! # Examples
//!
//! ```rust,ignore
//! use ramtable::io::{read_be, read_be_at};
//!
//! let data = [0x00, 0x01, 0x00, 0x02]; // Two big-endian u16 values: 1, 2
//! let mut offset = 0;
//!
//! let first: u16 = read_be_at(&data, &mut offset)?;
//! assert_eq!(first, 1);
//! assert_eq!(offset, 2);
//!
//! let second: u16 = read_be(&data[offset..])?;
//! assert_eq!(second, 2);
//! # Ok::<(), ramtable::Error>(())
//! ```

use crate::{Error::OutOfBounds, Result};

/// Primitive types that can be decoded from a device byte buffer.
pub trait RawIO: Sized {
    /// Associated type representing the byte array type for this numeric type.
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte buffer in big-endian
    fn from_be_bytes(bytes: Self::Bytes) -> Self;
}

impl RawIO for u8 {
    type Bytes = [u8; 1];

    fn from_be_bytes(bytes: Self::Bytes) -> Self {
        u8::from_be_bytes(bytes)
    }
}

impl RawIO for i8 {
    type Bytes = [u8; 1];

    fn from_be_bytes(bytes: Self::Bytes) -> Self {
        i8::from_be_bytes(bytes)
    }
}

impl RawIO for u16 {
    type Bytes = [u8; 2];

    fn from_be_bytes(bytes: Self::Bytes) -> Self {
        u16::from_be_bytes(bytes)
    }
}

impl RawIO for i16 {
    type Bytes = [u8; 2];

    fn from_be_bytes(bytes: Self::Bytes) -> Self {
        i16::from_be_bytes(bytes)
    }
}

impl RawIO for u32 {
    type Bytes = [u8; 4];

    fn from_be_bytes(bytes: Self::Bytes) -> Self {
        u32::from_be_bytes(bytes)
    }
}

impl RawIO for i32 {
    type Bytes = [u8; 4];

    fn from_be_bytes(bytes: Self::Bytes) -> Self {
        i32::from_be_bytes(bytes)
    }
}

impl RawIO for f32 {
    type Bytes = [u8; 4];

    fn from_be_bytes(bytes: Self::Bytes) -> Self {
        f32::from_be_bytes(bytes)
    }
}

/// Safely reads a value of type `T` in big-endian byte order from the start of a buffer.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
pub fn read_be<T: RawIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_be_at(data, &mut offset)
}

/// Safely reads a value of type `T` in big-endian byte order at `offset`, advancing
/// the offset by the number of bytes read.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
pub fn read_be_at<T: RawIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let Some(end) = offset.checked_add(type_len) else {
        return Err(OutOfBounds);
    };
    if end > data.len() {
        return Err(OutOfBounds);
    }

    let Ok(read) = data[*offset..end].try_into() else {
        return Err(OutOfBounds);
    };

    *offset = end;

    Ok(T::from_be_bytes(read))
}
