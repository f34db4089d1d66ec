use thiserror::Error;

use crate::tag::TagSet;

#[derive(Debug, Error)]
pub enum ClassPoolError {
    #[error("Invalid magic identifier: 0x{0:X}")]
    BadMagic(u32),
    #[error("Class file version {major}.{minor} predates module support")]
    UnsupportedVersion { major: u16, minor: u16 },
    #[error("Truncated input: wanted {want} byte(s) at offset {offset}")]
    TruncatedPool { offset: usize, want: usize },
    #[error("Invalid constant pool tag {tag} at offset {offset}")]
    MalformedPool { tag: u8, offset: usize },
    #[error("Invalid constant pool index: {0}")]
    BadPoolIndex(u16),
    #[error("Constant pool entry {index} has tag {actual}, expected one of {expected:?}")]
    UnexpectedTag {
        index: u16,
        actual: u8,
        expected: TagSet,
    },
    #[error("Invalid module-info access flags: 0x{0:X}")]
    BadModuleFlags(u16),
    #[error("Expected {0} to be zero, found {1}")]
    UnexpectedNonZeroCount(&'static str, u16),
    #[error("No Module attribute found")]
    NoModuleAttribute,
}
