#![no_main]

use libfuzzer_sys::fuzz_target;
use ramtable::{build_queries, DataType, LinearConverter, LoggerParameter, TableDefinition};
use std::sync::Arc;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(definition) = TableDefinition::from_json(json) else {
        return;
    };

    // Keep generation bounded, the addressing is what is under test
    if u64::from(definition.rows) * u64::from(definition.columns) > 1 << 16 {
        return;
    }

    let parameter = LoggerParameter::new(
        "fuzz",
        "fuzz",
        Arc::new(LinearConverter::new("", DataType::Uint16, 1.0, 0.0)),
    );
    if let Ok(spec) = definition.to_spec(&parameter) {
        let batches = build_queries(&spec).expect("validated spec must generate");
        assert_eq!(batches.len(), definition.rows as usize);
    }
});
