//! Base types for the structure of a TBL file.

use binrw::{BinRead, BinWrite};

/// TBL file header
///
/// All fields are stored in little endian format. The CRC covers every byte of the
/// string pool, i.e. the range `[data_start_offset, file_size)`.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct TblHeader {
    /// CRC-32 of the string pool
    pub crc: u32,

    /// The number of records stored in the file
    pub nodes_number: u16,

    /// The size of the hash table, always equal to [`Self::nodes_number`]
    pub hash_table_size: u16,

    /// Format version, always written as 1
    pub version: u32,

    /// The offset from the beginning of the file where the string pool starts
    pub data_start_offset: u32,

    /// 1 + the maximum linear probe distance used when resolving collisions
    pub hash_max_tries: u32,

    /// Total byte length of the file
    pub file_size: u32,
}

impl TblHeader {
    /// Serialized size of the header in bytes
    pub const SIZE: u32 = 24;

    /// The string pool offset implied by the record count
    pub fn expected_data_start(nodes_number: u16) -> u32 {
        Self::SIZE + nodes_number as u32 * 2 + nodes_number as u32 * TblHashNode::SIZE
    }
}

/// TBL hash table node
///
/// One node per hash table slot; the slot count equals the record count. An inactive
/// slot is written as all zeroes.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct TblHashNode {
    /// 1 if this slot holds a record, 0 if empty
    pub active: u8,

    /// The logical (insertion order) row of the record placed in this slot
    pub index: u16,

    /// The key's hash value before collision probing
    pub hash_value: u32,

    /// Absolute byte offset of the null-terminated key string
    pub string_key_offset: u32,

    /// Absolute byte offset of the null-terminated value string
    pub string_val_offset: u32,

    /// Byte length of the value including its terminator
    pub string_val_length: u16,
}

impl TblHashNode {
    /// Serialized size of a node in bytes
    pub const SIZE: u32 = 17;
}
