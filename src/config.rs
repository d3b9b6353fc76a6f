//! Table definitions as stored in logger configuration files.
//!
//! A definition fixes where a table lives and how it is shaped; the logged parameter
//! it is sampled for is supplied separately when the definition is turned into a
//! [`TableSpec`]. Origins are written the way ECU definitions write addresses:
//!
//! ```json
//! {
//!   "name": "FLKC",
//!   "origin": "0xFF8D2C",
//!   "rows": 8,
//!   "columns": 4,
//!   "id_prefix": "flkc-"
//! }
//! ```
//!
//! `origin` also accepts a plain JSON number or a decimal string.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{address::DeviceAddress, builder::TableSpec, converter::DataSource, Result};

/// Placement and shape of one RAM table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDefinition {
    /// Display name of the table
    pub name: String,
    /// Address of cell `(0, 0)`
    #[serde(
        serialize_with = "serialize_address_hex",
        deserialize_with = "deserialize_address"
    )]
    pub origin: DeviceAddress,
    /// Number of rows
    pub rows: u32,
    /// Number of columns
    pub columns: u32,
    /// Prefix of the generated query ids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_prefix: Option<String>,
}

impl TableDefinition {
    /// Parses a single definition from JSON.
    ///
    /// # Errors
    /// Returns [`crate::Error::Config`] if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a JSON array of definitions.
    ///
    /// # Errors
    /// Returns [`crate::Error::Config`] if the document is malformed.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the definition to JSON, with the origin in hex notation.
    ///
    /// # Errors
    /// Returns [`crate::Error::Config`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Builds the spec of this table for the parameter `source`.
    ///
    /// # Errors
    /// Returns an error if the source cannot report its cell width, or if the
    /// resulting spec fails [`TableSpec::validate`].
    pub fn to_spec(&self, source: &dyn DataSource) -> Result<TableSpec> {
        let mut spec = TableSpec::from_source(self.origin, self.rows, self.columns, source)?;
        if let Some(prefix) = &self.id_prefix {
            spec = spec.with_id_prefix(prefix.as_str());
        }

        spec.validate()?;
        Ok(spec)
    }
}

fn serialize_address_hex<S>(
    address: &DeviceAddress,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&address.to_string())
}

/// Deserialize an address that accepts numbers, hex strings ("0xFF8D2C") or decimal strings ("1234").
fn deserialize_address<'de, D>(deserializer: D) -> std::result::Result<DeviceAddress, D::Error>
where
    D: Deserializer<'de>,
{
    let val = serde_json::Value::deserialize(deserializer)?;
    match val {
        serde_json::Value::Number(n) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .map(DeviceAddress::new)
            .ok_or_else(|| de::Error::custom("expected unsigned 32-bit address")),
        serde_json::Value::String(s) => {
            let s = s.trim();
            if s.starts_with("0x") || s.starts_with("0X") {
                s.parse::<DeviceAddress>().map_err(de::Error::custom)
            } else if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                Err(de::Error::custom(format!("invalid decimal address '{s}'")))
            } else {
                s.parse::<u32>()
                    .map(DeviceAddress::new)
                    .map_err(de::Error::custom)
            }
        }
        _ => Err(de::Error::custom("expected number or hex string")),
    }
}
