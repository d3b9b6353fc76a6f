use strum::{Display, EnumCount, EnumIter, EnumString};

use crate::{
    io::{read_be, RawIO},
    Error, Result,
};

/// Storage types of a single RAM table cell.
///
/// The type of the logged quantity determines how many bytes each cell occupies and
/// therefore the stride between neighbouring cell addresses. The string forms match
/// the names used in logger definitions (`uint8`, `int16`, `float`, ...).
///
/// ## Widths
/// - **`Uint8`**, **`Int8`**: 1 byte
/// - **`Uint16`**, **`Int16`**: 2 bytes
/// - **`Uint32`**, **`Int32`**, **`Float`**: 4 bytes
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Debug, Display, EnumString, EnumIter, EnumCount,
)]
#[strum(serialize_all = "lowercase")]
pub enum DataType {
    /// Unsigned 8-bit integer
    Uint8,
    /// Signed 8-bit integer
    Int8,
    /// Unsigned 16-bit integer
    Uint16,
    /// Signed 16-bit integer
    Int16,
    /// Unsigned 32-bit integer
    Uint32,
    /// Signed 32-bit integer
    Int32,
    /// IEEE-754 single precision float
    Float,
}

impl DataType {
    /// Byte width of one cell of this type
    #[must_use]
    pub fn width(&self) -> u32 {
        match self {
            DataType::Uint8 | DataType::Int8 => 1,
            DataType::Uint16 | DataType::Int16 => 2,
            DataType::Uint32 | DataType::Int32 | DataType::Float => 4,
        }
    }

    /// Parses a data type name as found in logger definitions.
    ///
    /// # Errors
    /// Returns [`Error::UnknownDataType`] if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self> {
        name.trim()
            .to_ascii_lowercase()
            .parse()
            .map_err(|_| Error::UnknownDataType(name.to_string()))
    }

    /// Decodes one big-endian cell of this type from `raw`.
    ///
    /// Trailing bytes beyond [`DataType::width`] are ignored.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if `raw` is shorter than one cell.
    pub fn decode(&self, raw: &[u8]) -> Result<f64> {
        match self {
            DataType::Uint8 => decode_as::<u8>(raw),
            DataType::Int8 => decode_as::<i8>(raw),
            DataType::Uint16 => decode_as::<u16>(raw),
            DataType::Int16 => decode_as::<i16>(raw),
            DataType::Uint32 => decode_as::<u32>(raw),
            DataType::Int32 => decode_as::<i32>(raw),
            DataType::Float => decode_as::<f32>(raw),
        }
    }
}

fn decode_as<T: RawIO + Into<f64>>(raw: &[u8]) -> Result<f64> {
    read_be::<T>(raw).map(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn widths() {
        assert_eq!(DataType::Uint8.width(), 1);
        assert_eq!(DataType::Int8.width(), 1);
        assert_eq!(DataType::Uint16.width(), 2);
        assert_eq!(DataType::Int16.width(), 2);
        assert_eq!(DataType::Uint32.width(), 4);
        assert_eq!(DataType::Int32.width(), 4);
        assert_eq!(DataType::Float.width(), 4);
    }

    #[test]
    fn every_type_has_a_width() {
        assert_eq!(DataType::iter().count(), DataType::COUNT);
        for data_type in DataType::iter() {
            assert!(data_type.width() >= 1);
        }
    }

    #[test]
    fn names() {
        assert_eq!(DataType::Uint16.to_string(), "uint16");
        assert_eq!(DataType::from_name("uint16").unwrap(), DataType::Uint16);
        assert_eq!(DataType::from_name(" FLOAT ").unwrap(), DataType::Float);

        for data_type in DataType::iter() {
            assert_eq!(DataType::from_name(&data_type.to_string()).unwrap(), data_type);
        }
    }

    #[test]
    fn unknown_name() {
        let result = DataType::from_name("uint24");
        assert!(matches!(result, Err(Error::UnknownDataType(name)) if name == "uint24"));
    }

    #[test]
    fn decode() {
        assert_eq!(DataType::Uint8.decode(&[0x80]).unwrap(), 128.0);
        assert_eq!(DataType::Int8.decode(&[0x80]).unwrap(), -128.0);
        assert_eq!(DataType::Uint16.decode(&[0x01, 0x00]).unwrap(), 256.0);
        assert_eq!(DataType::Int16.decode(&[0xFF, 0xFF]).unwrap(), -1.0);
        assert_eq!(
            DataType::Uint32.decode(&[0x00, 0x01, 0x00, 0x00]).unwrap(),
            65536.0
        );
        assert_eq!(
            DataType::Int32.decode(&[0xFF, 0xFF, 0xFF, 0xFE]).unwrap(),
            -2.0
        );
        assert_eq!(
            DataType::Float.decode(&(-0.25_f32).to_be_bytes()).unwrap(),
            -0.25
        );
    }

    #[test]
    fn decode_ignores_trailing_bytes() {
        assert_eq!(DataType::Uint8.decode(&[0x05, 0xFF, 0xFF]).unwrap(), 5.0);
    }

    #[test]
    fn decode_short_input() {
        assert!(matches!(
            DataType::Uint16.decode(&[0x01]),
            Err(Error::OutOfBounds)
        ));
        assert!(matches!(DataType::Float.decode(&[]), Err(Error::OutOfBounds)));
    }
}
