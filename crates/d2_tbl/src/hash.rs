//! The table hash and checksum functions shared by the reader and the writer.

use crc::Crc;

const TBL_CRC: Crc<u32> = Crc::<u32>::new(&crc::CRC_32_ISO_HDLC);

/// Hash a key's raw bytes into a slot of a table of `table_size` entries.
///
/// ELF-style accumulator: shift the running hash left by a nibble, add the byte and
/// fold the overflowing top nibble back in with an XOR, then reduce modulo the table
/// size. Because the reduction is part of the function, the same key hashes differently
/// for tables of different sizes; callers must pass the current record count, both when
/// building the table and when displaying a key's hash for an existing file.
///
/// `table_size` must be nonzero.
pub fn table_hash(key: &[u8], table_size: u16) -> u32 {
    debug_assert!(table_size > 0);

    let mut hash: u32 = 0;
    for &byte in key {
        hash = (hash << 4).wrapping_add(byte as u32);
        let overflow = hash & 0xF000_0000;
        if overflow != 0 {
            hash ^= overflow >> 24;
            hash &= !overflow;
        }
    }
    hash % table_size as u32
}

/// CRC-32 over a byte range, used for the header's integrity field.
pub fn checksum(bytes: &[u8]) -> u32 {
    TBL_CRC.checksum(bytes)
}
