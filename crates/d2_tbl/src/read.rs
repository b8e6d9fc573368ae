//! Types for reading TBL string table files

use binrw::BinRead;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};
use tracing::instrument;

use crate::colors::ColorMap;
use crate::error::{Error, Result};
use crate::hash::{checksum, table_hash};
use crate::table::StringTable;
use crate::types::{TblHashNode, TblHeader};
use crate::write::latin1_key;

/// TBL file reader
///
/// Parses a whole file into its header and an ordered record list. The hash table is
/// only traversed to recover logical order; its hash values and the header CRC are
/// informational, so a table with a stale checksum still loads and can be repaired by
/// writing it back out.
///
/// ```no_run
/// use std::io::prelude::*;
///
/// fn list_entries(reader: impl Read) -> d2_tbl::error::Result<()> {
///     let colors = d2_tbl::ColorMap::default();
///     let tbl = d2_tbl::TblReader::new(reader, &colors)?;
///
///     for record in tbl.table().iter() {
///         println!("{}: {}", record.key, record.value);
///     }
///
///     Ok(())
/// }
/// ```
pub struct TblReader {
    header: TblHeader,
    table: StringTable,
    pool_crc: u32,
}

impl TblReader {
    /// Read a TBL file to its end and parse it.
    pub fn new<R: Read>(mut reader: R, colors: &ColorMap) -> Result<TblReader> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes, colors)
    }

    /// Parse a TBL file from an in-memory buffer.
    ///
    /// Trailing bytes beyond the header's file size are ignored; a buffer shorter than
    /// the header promises fails with [`Error::TruncatedFile`].
    #[instrument(skip_all, err, fields(size = bytes.len()))]
    pub fn from_bytes(bytes: &[u8], colors: &ColorMap) -> Result<TblReader> {
        if bytes.len() < TblHeader::SIZE as usize {
            return Err(Error::TruncatedFile {
                expected: TblHeader::SIZE as u64,
                actual: bytes.len() as u64,
            });
        }

        let mut cursor = Cursor::new(bytes);
        let header = TblHeader::read(&mut cursor)?;
        let n = header.nodes_number;

        if header.hash_table_size != n {
            return Err(Error::MalformedHeader {
                detail: format!(
                    "hash table size {} does not equal record count {}",
                    header.hash_table_size, n
                ),
            });
        }
        if header.data_start_offset != TblHeader::expected_data_start(n) {
            return Err(Error::MalformedHeader {
                detail: format!(
                    "data start offset {} does not match record count {} (expected {})",
                    header.data_start_offset,
                    n,
                    TblHeader::expected_data_start(n)
                ),
            });
        }
        if header.file_size < header.data_start_offset {
            return Err(Error::MalformedHeader {
                detail: format!(
                    "file size {} is smaller than the string pool offset {}",
                    header.file_size, header.data_start_offset
                ),
            });
        }

        let expected = (header.file_size - TblHeader::SIZE) as u64;
        let actual = (bytes.len() - TblHeader::SIZE as usize) as u64;
        if actual < expected {
            return Err(Error::TruncatedFile { expected, actual });
        }
        let file = &bytes[..header.file_size as usize];

        let mut indices = Vec::with_capacity(n as usize);
        for _ in 0..n {
            indices.push(cursor.read_u16::<LittleEndian>()?);
        }

        let mut nodes = Vec::with_capacity(n as usize);
        for _ in 0..n {
            nodes.push(TblHashNode::read(&mut cursor)?);
        }

        // logical row i lives in the slot the index array names
        let mut table = StringTable::default();
        for (row, &slot) in indices.iter().enumerate() {
            if slot >= n {
                return Err(Error::MalformedHeader {
                    detail: format!(
                        "index array entry {row} points to slot {slot} of a {n}-slot table"
                    ),
                });
            }
            let node = &nodes[slot as usize];

            let key = read_key(file, node.string_key_offset)?;
            let value = read_value(file, node.string_val_offset, node.string_val_length)?;
            table.push(key, colors.decode_codes(&value));
        }

        let pool = &file[header.data_start_offset as usize..];

        Ok(TblReader {
            header,
            table,
            pool_crc: checksum(pool),
        })
    }

    /// Number of records contained in this table.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether this table contains no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the parsed file header
    pub fn header(&self) -> &TblHeader {
        &self.header
    }

    /// Get a reference to the decoded records in logical order
    pub fn table(&self) -> &StringTable {
        &self.table
    }

    /// Consume the reader, returning the decoded records
    pub fn into_table(self) -> StringTable {
        self.table
    }

    /// Recompute the string pool checksum and compare it against the header.
    ///
    /// A mismatch marks the file as corrupted or hand-edited but does not prevent
    /// decoding; saving the table rewrites a correct checksum.
    pub fn verify_integrity(&self) -> bool {
        self.pool_crc == self.header.crc
    }

    /// Hash of the key at a logical row, for the table's own size.
    ///
    /// This is the diagnostic value editors display next to a row. Returns `None` for
    /// a row that does not exist or a key that is not representable in the single-byte
    /// key charset.
    pub fn key_hash(&self, row: usize) -> Option<u32> {
        let record = self.table.record(row)?;
        let key_bytes = latin1_key(&record.key).ok()?;
        Some(table_hash(&key_bytes, self.header.nodes_number))
    }
}

fn read_key(file: &[u8], offset: u32) -> Result<String> {
    let start = offset as usize;
    if start >= file.len() {
        return Err(Error::StringBoundsError {
            offset: offset as u64,
        });
    }
    let nul = file[start..]
        .iter()
        .position(|&b| b == 0)
        .ok_or(Error::StringBoundsError {
            offset: offset as u64,
        })?;

    // keys use a single-byte encoding, one Latin-1 char per byte
    Ok(file[start..start + nul].iter().map(|&b| b as char).collect())
}

fn read_value(file: &[u8], offset: u32, length: u16) -> Result<String> {
    if length == 0 {
        return Ok(String::new());
    }
    let start = offset as usize;
    let end = start + length as usize - 1; // declared length includes the terminator
    if end > file.len() {
        return Err(Error::StringBoundsError {
            offset: offset as u64,
        });
    }
    Ok(String::from_utf8_lossy(&file[start..end]).into_owned())
}
