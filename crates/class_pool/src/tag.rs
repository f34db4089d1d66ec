//! Constant pool tag bytes and the tag capability sets used to gate
//! resolve calls.
//!
//! https://docs.oracle.com/javase/specs/jvms/se18/html/jvms-4.html#jvms-4.4-210

use bitflags::bitflags;

pub const CONSTANT_UTF8: u8 = 1;
pub const CONSTANT_INTEGER: u8 = 3;
pub const CONSTANT_FLOAT: u8 = 4;
pub const CONSTANT_LONG: u8 = 5;
pub const CONSTANT_DOUBLE: u8 = 6;
pub const CONSTANT_CLASS: u8 = 7;
pub const CONSTANT_STRING: u8 = 8;
pub const CONSTANT_FIELDREF: u8 = 9;
pub const CONSTANT_METHODREF: u8 = 10;
pub const CONSTANT_INTERFACE_METHODREF: u8 = 11;
pub const CONSTANT_NAME_AND_TYPE: u8 = 12;
pub const CONSTANT_METHOD_HANDLE: u8 = 15;
pub const CONSTANT_METHOD_TYPE: u8 = 16;
pub const CONSTANT_DYNAMIC: u8 = 17;
pub const CONSTANT_INVOKE_DYNAMIC: u8 = 18;
pub const CONSTANT_MODULE: u8 = 19;
pub const CONSTANT_PACKAGE: u8 = 20;

bitflags! {
    /// The set of constant pool tags a resolve call accepts. Bit n stands
    /// for tag n, so membership is a single mask test. Call sites pass one
    /// of the constants below; the resolver never hardcodes consumer
    /// expectations.
    pub struct TagSet: u32 {
        const UTF8 = 1 << CONSTANT_UTF8;
        const INTEGER = 1 << CONSTANT_INTEGER;
        const FLOAT = 1 << CONSTANT_FLOAT;
        const LONG = 1 << CONSTANT_LONG;
        const DOUBLE = 1 << CONSTANT_DOUBLE;
        const CLASS = 1 << CONSTANT_CLASS;
        const STRING = 1 << CONSTANT_STRING;
        const NAME_AND_TYPE = 1 << CONSTANT_NAME_AND_TYPE;
        const MODULE = 1 << CONSTANT_MODULE;
        const PACKAGE = 1 << CONSTANT_PACKAGE;

        /// Directly loadable literal entries.
        const LITERAL = Self::INTEGER.bits
            | Self::FLOAT.bits
            | Self::LONG.bits
            | Self::DOUBLE.bits
            | Self::STRING.bits;
    }
}

impl TagSet {
    pub fn contains_tag(self, tag: u8) -> bool {
        u32::from(tag) < u32::BITS && self.bits() & (1u32 << tag) != 0
    }
}
