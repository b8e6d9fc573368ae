use d2_tbl::error::{Error, Result};
use d2_tbl::hash::checksum;
use d2_tbl::read::TblReader;
use d2_tbl::ColorMap;
use tracing_test::traced_test;

/// A two-record file: rows ("Hello","World") and ("Foo","Bar"), both keys hashing to
/// slot 1 of the 2-slot table so "Foo" wrapped around to slot 0.
fn two_entry_file() -> Vec<u8> {
    let mut bytes = checksum(b"Foo\0Bar\0Hello\0World\0").to_le_bytes().to_vec();
    #[rustfmt::skip]
    bytes.extend([
        // Header (rest)
        0x02, 0x00,
        0x02, 0x00,
        0x01, 0x00, 0x00, 0x00,
        0x3E, 0x00, 0x00, 0x00,
        0x02, 0x00, 0x00, 0x00,
        0x52, 0x00, 0x00, 0x00,
        // Index array
        0x01, 0x00,
        0x00, 0x00,
        // Node, slot 0
        0x01,
        0x01, 0x00,
        0x01, 0x00, 0x00, 0x00,
        0x3E, 0x00, 0x00, 0x00,
        0x42, 0x00, 0x00, 0x00,
        0x04, 0x00,
        // Node, slot 1
        0x01,
        0x00, 0x00,
        0x01, 0x00, 0x00, 0x00,
        0x46, 0x00, 0x00, 0x00,
        0x4C, 0x00, 0x00, 0x00,
        0x06, 0x00,
        // String pool
        0x46, 0x6F, 0x6F, 0x00,
        0x42, 0x61, 0x72, 0x00,
        0x48, 0x65, 0x6C, 0x6C, 0x6F, 0x00,
        0x57, 0x6F, 0x72, 0x6C, 0x64, 0x00,
    ]);
    bytes
}

#[traced_test]
#[test]
fn read_two_entry_table() -> Result<()> {
    let colors = ColorMap::default();
    let tbl = TblReader::from_bytes(&two_entry_file(), &colors)?;

    assert_eq!(tbl.len(), 2);
    // logical order, not slot order
    assert_eq!(tbl.table().record(0).unwrap().key, "Hello");
    assert_eq!(tbl.table().record(0).unwrap().value, "World");
    assert_eq!(tbl.table().record(1).unwrap().key, "Foo");
    assert_eq!(tbl.table().record(1).unwrap().value, "Bar");

    assert_eq!(tbl.header().nodes_number, 2);
    assert_eq!(tbl.header().hash_table_size, 2);
    assert_eq!(tbl.header().version, 1);
    assert_eq!(tbl.header().data_start_offset, 62);
    assert_eq!(tbl.header().hash_max_tries, 2);
    assert_eq!(tbl.header().file_size, 82);

    assert!(tbl.verify_integrity());
    assert_eq!(tbl.key_hash(0), Some(1));
    assert_eq!(tbl.key_hash(1), Some(1));
    assert_eq!(tbl.key_hash(2), None);

    Ok(())
}

#[traced_test]
#[test]
fn read_empty_table() -> Result<()> {
    #[rustfmt::skip]
    let input = [
        0x00, 0x00, 0x00, 0x00,
        0x00, 0x00,
        0x00, 0x00,
        0x01, 0x00, 0x00, 0x00,
        0x18, 0x00, 0x00, 0x00,
        0x01, 0x00, 0x00, 0x00,
        0x18, 0x00, 0x00, 0x00,
    ];

    let tbl = TblReader::from_bytes(&input, &ColorMap::default())?;
    assert!(tbl.is_empty());
    assert!(tbl.verify_integrity());

    Ok(())
}

#[traced_test]
#[test]
fn color_escapes_are_expanded_on_read() -> Result<()> {
    // single record, key "k", value "ÿc1Hi" (UTF-8 escape prefix, code '1' = red)
    let pool = b"k\0\xC3\xBFc1Hi\0";
    let mut input = checksum(pool).to_le_bytes().to_vec();
    #[rustfmt::skip]
    input.extend([
        // Header (rest): 1 record, pool at 43, file size 52
        0x01, 0x00,
        0x01, 0x00,
        0x01, 0x00, 0x00, 0x00,
        0x2B, 0x00, 0x00, 0x00,
        0x01, 0x00, 0x00, 0x00,
        0x34, 0x00, 0x00, 0x00,
        // Index array
        0x00, 0x00,
        // Node, slot 0
        0x01,
        0x00, 0x00,
        0x00, 0x00, 0x00, 0x00,
        0x2B, 0x00, 0x00, 0x00,
        0x2D, 0x00, 0x00, 0x00,
        0x07, 0x00,
    ]);
    input.extend_from_slice(pool);

    let tbl = TblReader::from_bytes(&input, &ColorMap::default())?;
    assert_eq!(tbl.table().record(0).unwrap().value, "\\red;Hi");

    Ok(())
}

#[traced_test]
#[test]
fn truncated_buffer_errors() {
    let mut input = two_entry_file();
    input.pop();

    let result = TblReader::from_bytes(&input, &ColorMap::default());
    assert!(matches!(
        result,
        Err(Error::TruncatedFile {
            expected: 58,
            actual: 57,
        })
    ));
}

#[traced_test]
#[test]
fn buffer_shorter_than_header_errors() {
    let result = TblReader::from_bytes(&[0u8; 10], &ColorMap::default());
    assert!(matches!(result, Err(Error::TruncatedFile { .. })));
}

#[traced_test]
#[test]
fn oversized_file_size_field_errors() {
    let mut input = two_entry_file();
    // bump the header's file size past the real buffer length
    input[20..24].copy_from_slice(&100u32.to_le_bytes());

    let result = TblReader::from_bytes(&input, &ColorMap::default());
    assert!(matches!(result, Err(Error::TruncatedFile { .. })));
}

#[traced_test]
#[test]
fn wrong_data_start_offset_errors() {
    let mut input = two_entry_file();
    input[12..16].copy_from_slice(&63u32.to_le_bytes());

    let result = TblReader::from_bytes(&input, &ColorMap::default());
    assert!(matches!(result, Err(Error::MalformedHeader { .. })));
}

#[traced_test]
#[test]
fn mismatched_hash_table_size_errors() {
    let mut input = two_entry_file();
    input[6..8].copy_from_slice(&3u16.to_le_bytes());

    let result = TblReader::from_bytes(&input, &ColorMap::default());
    assert!(matches!(result, Err(Error::MalformedHeader { .. })));
}

#[traced_test]
#[test]
fn index_entry_out_of_range_errors() {
    let mut input = two_entry_file();
    // first index array entry, right after the header
    input[24..26].copy_from_slice(&5u16.to_le_bytes());

    let result = TblReader::from_bytes(&input, &ColorMap::default());
    assert!(matches!(result, Err(Error::MalformedHeader { .. })));
}

#[traced_test]
#[test]
fn key_offset_out_of_bounds_errors() {
    let mut input = two_entry_file();
    // slot 0's key offset lives 7 bytes into the node array at offset 28
    input[35..39].copy_from_slice(&82u32.to_le_bytes());

    let result = TblReader::from_bytes(&input, &ColorMap::default());
    assert!(matches!(
        result,
        Err(Error::StringBoundsError { offset: 82 })
    ));
}

#[traced_test]
#[test]
fn value_length_out_of_bounds_errors() {
    let mut input = two_entry_file();
    // slot 0's value length field at the end of the node
    input[43..45].copy_from_slice(&200u16.to_le_bytes());

    let result = TblReader::from_bytes(&input, &ColorMap::default());
    assert!(matches!(result, Err(Error::StringBoundsError { .. })));
}

#[traced_test]
#[test]
fn trailing_bytes_are_ignored() -> Result<()> {
    let mut input = two_entry_file();
    input.extend_from_slice(b"garbage");

    let tbl = TblReader::from_bytes(&input, &ColorMap::default())?;
    assert_eq!(tbl.len(), 2);
    assert!(tbl.verify_integrity());

    Ok(())
}

#[traced_test]
#[test]
fn stale_checksum_still_loads() -> Result<()> {
    let mut input = two_entry_file();
    let last = input.len() - 2;
    input[last] ^= 0xFF; // corrupt a pool byte

    let tbl = TblReader::from_bytes(&input, &ColorMap::default())?;
    assert_eq!(tbl.len(), 2);
    assert!(!tbl.verify_integrity());

    Ok(())
}
