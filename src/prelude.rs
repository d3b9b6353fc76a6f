//! # ramtable Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the ramtable library. Import this module to get quick access to everything
//! needed to turn a table definition into row batches of queries.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all ramtable operations
pub use crate::Error;

/// The result type used throughout ramtable
pub use crate::Result;

// ================================================================================================
// Addressing
// ================================================================================================

/// Device address and the cell address calculation
pub use crate::address::{cell_address, DeviceAddress};

// ================================================================================================
// Data Types and Converters
// ================================================================================================

/// Cell storage types
pub use crate::datatype::DataType;

/// Injected converter and data source capabilities
pub use crate::converter::{
    ConverterRef, DataSource, LinearConverter, LoggerParameter, UnitConverter,
};

// ================================================================================================
// Query Generation
// ================================================================================================

/// Query descriptors and batches
pub use crate::query::{QueryDescriptor, RowBatch, RowSlot, TableBatches};

/// Table specs and the generation entry points
pub use crate::builder::{build_queries, build_tables, cell_id, TableSpec};

/// Table definitions from configuration files
pub use crate::config::TableDefinition;
