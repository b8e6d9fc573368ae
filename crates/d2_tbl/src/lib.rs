//! This library handles reading from and creating **TBL** string table files used by *Diablo II*.
//!
//! # TBL Format Documentation
//!
//! This crate provides utilities to read and edit the **TBL** format used by the game
//! *Diablo II* for its localized string tables. The TBL format is a custom binary format
//! that stores an ordered list of string keys and values behind an open-addressing hash
//! table. TBL files are typically identified with the `.tbl` extension.
//!
//! ## File Structure
//!
//! A TBL file consists of a header, an index array, a hash node array, and a string pool.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | CRC                    | 4 bytes: CRC-32 checksum of all bytes of the string pool   |
//! | 0x0004         | Nodes Number           | 2 bytes: Number of records, equals the hash table size     |
//! | 0x0006         | Hash Table Size        | 2 bytes: Always equals Nodes Number in this format         |
//! | 0x0008         | Version                | 4 bytes: Format version, always written as 1               |
//! | 0x000C         | Data Start Offset      | 4 bytes: Byte offset where the string pool begins          |
//! | 0x0010         | Hash Max Tries         | 4 bytes: 1 + the maximum linear probe distance             |
//! | 0x0014         | File Size              | 4 bytes: Total byte length of the file                     |
//!
//! ### Index Array
//!
//! After the 24-byte header, the file contains one `u16` per logical record. The entry at
//! position `i` is the hash table slot that record `i` was placed into, allowing the
//! original insertion order to be reconstructed independently of slot order.
//!
//! ### Hash Node Array
//!
//! One fixed-size node per hash table slot, the slot count being equal to the record
//! count. Each node has the following structure:
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Active                 | 1 byte: 1 if this slot holds a record, 0 if empty       |
//! | 0x0001         | Index                  | 2 bytes: The record's logical (insertion order) row     |
//! | 0x0003         | Hash Value             | 4 bytes: The key's hash before collision probing        |
//! | 0x0007         | String Key Offset      | 4 bytes: Absolute offset of the null-terminated key     |
//! | 0x000B         | String Val Offset      | 4 bytes: Absolute offset of the null-terminated value   |
//! | 0x000F         | String Val Length      | 2 bytes: Value byte length including its terminator     |
//!
//! Collisions are resolved at build time by linear probing with wraparound; a node keeps
//! the key's pre-probe hash value, not the slot it ended up in.
//!
//! ### String Pool
//!
//! The contiguous region starting at Data Start Offset holding all key/value byte
//! strings, packed in hash-slot order. Keys are stored in a single-byte (Latin-1)
//! encoding, values in UTF-8; both are null-terminated. Values may embed color escape
//! sequences, a prefix followed by an optional single code character; see
//! [`colors::ColorMap`] for the human-readable marker mapping.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.tbl`
//! - **Endianness**: Little-endian for all multi-byte integers
//! - **Invariant**: `Data Start Offset = 24 + n*2 + n*17` and the hash table is always
//!   exactly as large as the record count, so any insertion or deletion implies a full
//!   rebuild on the next write.
//!

pub mod colors;
pub mod error;
pub mod hash;
pub mod read;
pub mod table;
pub mod types;
pub mod write;

pub use colors::ColorMap;
pub use read::TblReader;
pub use table::{Record, StringTable};
pub use write::TblWriter;
