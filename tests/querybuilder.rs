//! Integration tests for RAM table query generation.
//!
//! These tests drive the public API the way a logger does: a table definition is
//! loaded, combined with the logged parameter, and turned into row batches that are
//! issued one row at a time.

use ramtable::{prelude::*, Result};
use std::sync::Arc;
use std::thread;

fn ltft_parameter() -> LoggerParameter {
    // (x - 128) * 100 / 128, one byte per cell
    let converter: ConverterRef =
        Arc::new(LinearConverter::new("%", DataType::Uint8, 100.0 / 128.0, -100.0));
    LoggerParameter::new("E40", "A/F Learning #1 (LTFT)", converter)
}

fn word_converter() -> ConverterRef {
    Arc::new(LinearConverter::new("%", DataType::Uint16, 0.01, 0.0))
}

/// The reference layout: origin 0x1000, two rows of three 2-byte cells.
#[test]
fn test_two_by_three_layout() -> Result<()> {
    let spec = TableSpec::new(DeviceAddress::new(0x1000), 2, 3, 2, word_converter());
    let batches = build_queries(&spec)?;

    let rendered: Vec<Vec<Option<(String, String)>>> = batches
        .iter()
        .map(|batch| {
            batch
                .slots()
                .iter()
                .map(|slot| {
                    slot.as_query()
                        .map(|q| (q.id().to_string(), q.address_string()))
                })
                .collect()
        })
        .collect();

    let slot = |id: &str, address: &str| Some((id.to_string(), address.to_string()));
    assert_eq!(
        rendered,
        vec![
            vec![
                None,
                slot("r0c0", "0x1000"),
                slot("r0c1", "0x1002"),
                slot("r0c2", "0x1004"),
            ],
            vec![
                None,
                slot("r1c0", "0x1006"),
                slot("r1c1", "0x1008"),
                slot("r1c2", "0x100A"),
            ],
        ]
    );

    Ok(())
}

/// A definition file drives generation for a logged parameter.
#[test]
fn test_definition_to_batches() -> Result<()> {
    let definition = TableDefinition::from_json(
        r#"{"name":"LTFT","origin":"0xFF6A10","rows":4,"columns":4,"id_prefix":"ltft-"}"#,
    )?;
    let parameter = ltft_parameter();
    let spec = definition.to_spec(&parameter)?;
    let batches = build_queries(&spec)?;

    assert_eq!(batches.len(), 4);
    assert_eq!(batches.query_count(), 16);

    for (row, batch) in batches.iter().enumerate() {
        assert_eq!(batch.row() as usize, row);
        assert_eq!(batch.len(), 5);
        assert!(batch.slots()[0].is_header());

        let (start, bytes) = batch.span().expect("row has queries");
        assert_eq!(start.value(), 0xFF_6A10 + row as u32 * 4);
        assert_eq!(bytes, 4);
    }

    let last = batches.queries().last().expect("table has queries");
    assert_eq!(last.id(), "ltft-r3c3");
    assert_eq!(last.address_string(), "0xFF6A1F");
    assert_eq!(last.size(), 1);

    Ok(())
}

/// The converter attached to every query decodes the raw bytes the transport returns.
#[test]
fn test_shared_converter_decodes_responses() -> Result<()> {
    let parameter = ltft_parameter();
    let spec = TableSpec::from_source(DeviceAddress::new(0x2000), 1, 3, &parameter)?;
    let batches = build_queries(&spec)?;

    let responses: [&[u8]; 3] = [&[0x80], &[0x90], &[0x70]];
    let values: Vec<f64> = batches.rows()[0]
        .queries()
        .zip(responses)
        .map(|(query, raw)| query.converter().convert(raw))
        .collect::<Result<_>>()?;

    assert_eq!(values, vec![0.0, 12.5, -12.5]);
    for query in batches.queries() {
        assert!(Arc::ptr_eq(query.converter(), &spec.converter));
    }

    Ok(())
}

/// Tables sharing the address space stay distinguishable through their id prefix.
#[test]
fn test_multiple_tables_in_parallel() -> Result<()> {
    let definitions = TableDefinition::list_from_json(
        r#"[
            {"name":"LTFT","origin":"0xFF6A10","rows":4,"columns":4,"id_prefix":"ltft-"},
            {"name":"FLKC","origin":"0xFF8D2C","rows":8,"columns":4,"id_prefix":"flkc-"}
        ]"#,
    )?;
    let parameter = ltft_parameter();
    let specs = definitions
        .iter()
        .map(|definition| definition.to_spec(&parameter))
        .collect::<Result<Vec<_>>>()?;

    let tables = build_tables(&specs)?;
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].len(), 4);
    assert_eq!(tables[1].len(), 8);
    assert_eq!(tables[0].queries().next().map(QueryDescriptor::id), Some("ltft-r0c0"));
    assert_eq!(tables[1].queries().next().map(QueryDescriptor::id), Some("flkc-r0c0"));

    Ok(())
}

/// Generation from several threads at once yields identical results.
#[test]
fn test_concurrent_generation_is_deterministic() {
    let spec = Arc::new(TableSpec::new(
        DeviceAddress::new(0xFF_0000),
        16,
        16,
        4,
        word_converter(),
    ));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let spec = Arc::clone(&spec);
            thread::spawn(move || {
                build_queries(&spec)
                    .unwrap()
                    .queries()
                    .map(|q| (q.id().to_string(), q.address()))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results[0].len(), 256);
    for result in &results[1..] {
        assert_eq!(result, &results[0]);
    }
}

/// Invalid definitions surface as configuration errors and produce nothing.
#[test]
fn test_invalid_definitions() {
    let parameter = ltft_parameter();

    for json in [
        r#"{"name":"a","origin":"0x10","rows":0,"columns":4}"#,
        r#"{"name":"a","origin":"0x10","rows":4,"columns":0}"#,
    ] {
        let definition = TableDefinition::from_json(json).unwrap();
        assert!(matches!(
            definition.to_spec(&parameter),
            Err(Error::InvalidSpec { .. })
        ));
    }

    let definition =
        TableDefinition::from_json(r#"{"name":"a","origin":"0xFFFFFFF0","rows":4,"columns":8}"#)
            .unwrap();
    assert!(matches!(
        definition.to_spec(&parameter),
        Err(Error::AddressOverflow { .. })
    ));

    let spec = TableSpec::new(DeviceAddress::new(0x10), 4, 4, 0, word_converter());
    assert!(matches!(
        build_queries(&spec),
        Err(Error::InvalidSpec { .. })
    ));
}
