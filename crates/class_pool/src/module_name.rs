//! Module name extraction from a `module-info` class file.
//!
//! This is the minimal consumer of the pool machinery: index the pool once,
//! make a single linear pass over the attributes table, and peek only the
//! two names actually needed. Nothing is resolved through the caching tier,
//! so scanning a module path never materializes symbols for classes it only
//! glances at.

use crate::bytes::{ByteCursor, ByteSource};
use crate::constant_pool::PoolReader;
use crate::symbols::Symtab;
use crate::{AccessFlags, ClassPoolError, Result};

const MAGIC: u32 = 0xCAFE_BABE;

/// Java 9, the first release with module-info class files.
const FIRST_MODULE_MAJOR_VERSION: u16 = 53;

const MODULE_ATTRIBUTE: &[u8] = b"Module";

/// Reads the module name out of a `module-info` class file.
///
/// A module-info class is structurally constrained: its access flags are
/// exactly `ACC_MODULE` and it has no superclass, interfaces, fields or
/// methods. Each constraint is checked in file order and violations fail
/// fast; nothing after the winning attribute is read at all.
pub fn read_module_name(buf: &[u8]) -> Result<String> {
    let mut cursor = ByteCursor::new(ByteSource::new(buf));

    let magic = cursor.read_u32()?;
    if magic != MAGIC {
        return Err(ClassPoolError::BadMagic(magic));
    }

    let minor = cursor.read_u16()?;
    let major = cursor.read_u16()?;
    if major < FIRST_MODULE_MAJOR_VERSION {
        return Err(ClassPoolError::UnsupportedVersion { major, minor });
    }

    let reader = PoolReader::parse(&mut cursor, Symtab::new())?;

    let access_flags = cursor.read_u16()?;
    if access_flags != AccessFlags::MODULE.bits() {
        return Err(ClassPoolError::BadModuleFlags(access_flags));
    }

    let _this_class = cursor.read_u16()?;
    expect_zero(cursor.read_u16()?, "super_class")?;
    expect_zero(cursor.read_u16()?, "interfaces_count")?;
    expect_zero(cursor.read_u16()?, "fields_count")?;
    expect_zero(cursor.read_u16()?, "methods_count")?;

    let attributes_count = cursor.read_u16()?;
    for _ in 0..attributes_count {
        let name_index = cursor.read_u16()?;
        let length = cursor.read_u32()? as usize;
        if length > 2 && reader.peek_name(name_index, |bytes| bytes == MODULE_ATTRIBUTE)? {
            let module_index = cursor.read_u16()?;
            return reader
                .peek_module_name(module_index, |bytes| {
                    String::from_utf8_lossy(bytes).into_owned()
                });
        }
        cursor.skip(length)?;
    }

    Err(ClassPoolError::NoModuleAttribute)
}

fn expect_zero(value: u16, what: &'static str) -> Result<()> {
    if value != 0 {
        return Err(ClassPoolError::UnexpectedNonZeroCount(what, value));
    }
    Ok(())
}
