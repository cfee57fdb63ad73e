//! Minimal external-term-format subset shared with the host runtime.
//!
//! Only the tags the bridge actually exchanges are supported; anything else
//! on the decode path is a wire-contract violation.

mod reader;
mod writer;

pub use reader::TermReader;
pub use writer::TermWriter;

/// Version byte preceding every term body.
pub const VERSION: u8 = 131;

pub mod tag {
    pub const NEW_FLOAT_EXT: u8 = 70;
    pub const SMALL_INTEGER_EXT: u8 = 97;
    pub const INTEGER_EXT: u8 = 98;
    pub const ATOM_EXT: u8 = 100;
    pub const SMALL_TUPLE_EXT: u8 = 104;
    pub const LARGE_TUPLE_EXT: u8 = 105;
    pub const NIL_EXT: u8 = 106;
    pub const STRING_EXT: u8 = 107;
    pub const LIST_EXT: u8 = 108;
    pub const BINARY_EXT: u8 = 109;
    pub const SMALL_BIG_EXT: u8 = 110;
    pub const SMALL_ATOM_UTF8_EXT: u8 = 119;
    pub const ATOM_UTF8_EXT: u8 = 118;
    pub const MAP_EXT: u8 = 116;
}
