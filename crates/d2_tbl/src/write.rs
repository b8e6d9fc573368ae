//! Types for writing TBL string table files

use binrw::BinWrite;
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{Cursor, Seek, SeekFrom, Write};
use tracing::instrument;

use crate::colors::ColorMap;
use crate::error::{Error, Result};
use crate::hash::{checksum, table_hash};
use crate::table::StringTable;
use crate::types::{TblHashNode, TblHeader};

/// TBL file generator
///
/// Rebuilds the hash table from scratch on every write: the table is always exactly as
/// large as the record count, so any edit implies a full layout pass. The construction
/// is deterministic; identical records in identical order always produce identical
/// bytes.
///
/// ```
/// # fn doit() -> d2_tbl::error::Result<()>
/// # {
/// use d2_tbl::{ColorMap, StringTable, TblWriter};
///
/// let colors = ColorMap::default();
/// let mut table = StringTable::default();
/// table.push("strhelp1", "\\gold;Help");
///
/// // We use a buffer here, though you'd normally use a `File`
/// let buf = TblWriter::new(Vec::new(), &colors).write_table(&table)?;
/// # assert!(!buf.is_empty());
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
pub struct TblWriter<'a, W: Write> {
    inner: W,
    colors: &'a ColorMap,
}

impl<'a, W: Write> TblWriter<'a, W> {
    /// Create a writer that encodes through the given color mapping.
    pub fn new(inner: W, colors: &'a ColorMap) -> TblWriter<'a, W> {
        TblWriter { inner, colors }
    }

    /// Encode a snapshot of the records and write the file.
    ///
    /// All-or-nothing: the whole file is assembled in memory first, so on error
    /// nothing reaches the underlying writer.
    #[instrument(skip_all, err, fields(records = table.len()))]
    pub fn write_table(mut self, table: &StringTable) -> Result<W> {
        let bytes = encode(table, self.colors)?;
        self.inner.write_all(&bytes)?;
        Ok(self.inner)
    }
}

/// Encode an ordered record sequence into a complete TBL byte buffer.
///
/// Sections are built in order — index array, hash nodes, string pool — and the header
/// is written last, once every offset and the pool checksum are known.
pub fn encode(table: &StringTable, colors: &ColorMap) -> Result<Vec<u8>> {
    if table.len() > u16::MAX as usize {
        return Err(Error::TooManyRecords { count: table.len() });
    }
    let n = table.len() as u16;

    // encode all strings up front so a bad record fails before any layout happens
    let mut keys = Vec::with_capacity(n as usize);
    let mut values = Vec::with_capacity(n as usize);
    for (row, record) in table.iter().enumerate() {
        keys.push(latin1_key(&record.key)?);
        let value = colors.encode_markers(&record.value).into_bytes();
        if value.len() + 1 > u16::MAX as usize {
            return Err(Error::ValueTooLong {
                row,
                length: value.len(),
            });
        }
        values.push(value);
    }

    // every offset and the file size are 32-bit fields; reject layouts that would
    // overflow them before any bytes are assembled
    let data_start = TblHeader::expected_data_start(n);
    let total = layout_size(
        data_start,
        keys.iter().zip(&values).map(|(key, value)| (key.len(), value.len())),
    );
    if total > u32::MAX as u64 {
        return Err(Error::FileTooLarge { size: total });
    }

    // place rows into slots in logical order, linear probing with wraparound
    let mut slots: Vec<Option<(usize, u32)>> = vec![None; n as usize];
    let mut indices = vec![0u16; n as usize];
    let mut max_collisions: u32 = 0;
    for row in 0..n as usize {
        let hash = table_hash(&keys[row], n);
        let mut slot = hash as usize;
        let mut collisions: u32 = 0;
        while slots[slot].is_some() {
            collisions += 1;
            slot = (slot + 1) % n as usize;
        }
        slots[slot] = Some((row, hash));
        indices[row] = slot as u16;
        if collisions > max_collisions {
            max_collisions = collisions;
        }
    }

    // lay the string pool out in slot order and fill the nodes
    let mut nodes = vec![TblHashNode::default(); n as usize];
    let mut pool = Vec::new();
    let mut offset = data_start;
    for (slot, placement) in slots.iter().enumerate() {
        let Some((row, hash)) = *placement else {
            continue;
        };

        let key = &keys[row];
        let value = &values[row];
        let key_length = key.len() as u32 + 1;
        let val_length = value.len() as u32 + 1;

        nodes[slot] = TblHashNode {
            active: 1,
            index: row as u16,
            hash_value: hash,
            string_key_offset: offset,
            string_val_offset: offset + key_length,
            string_val_length: val_length as u16,
        };

        pool.extend_from_slice(key);
        pool.push(0);
        pool.extend_from_slice(value);
        pool.push(0);
        offset += key_length + val_length;
    }

    // header placeholder first, rewritten once every field is known
    let mut buf = Cursor::new(Vec::with_capacity(offset as usize));
    buf.write_all(&[0u8; TblHeader::SIZE as usize])?;
    for &index in &indices {
        buf.write_u16::<LittleEndian>(index)?;
    }
    for node in &nodes {
        node.write(&mut buf)?;
    }
    buf.write_all(&pool)?;

    let file_size = buf.get_ref().len() as u32;
    let header = TblHeader {
        crc: checksum(&buf.get_ref()[data_start as usize..]),
        nodes_number: n,
        hash_table_size: n,
        version: 1,
        data_start_offset: data_start,
        hash_max_tries: max_collisions + 1,
        file_size,
    };
    buf.seek(SeekFrom::Start(0))?;
    header.write(&mut buf)?;

    Ok(buf.into_inner())
}

/// Total file size implied by encoded key/value byte lengths, each pair costing two
/// null terminators on top of its own bytes.
fn layout_size(data_start: u32, lengths: impl Iterator<Item = (usize, usize)>) -> u64 {
    data_start as u64
        + lengths
            .map(|(key, value)| key as u64 + value as u64 + 2)
            .sum::<u64>()
}

pub(crate) fn latin1_key(key: &str) -> Result<Vec<u8>> {
    key.chars()
        .map(|c| {
            let cp = c as u32;
            // NUL would break the key's terminator scan on read
            if cp == 0 || cp > 0xFF {
                Err(Error::UnsupportedEncoding {
                    key: key.to_string(),
                })
            } else {
                Ok(cp as u8)
            }
        })
        .collect()
}
