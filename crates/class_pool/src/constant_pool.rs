use std::rc::Rc;

use crate::bytes::{ByteCursor, ByteSource};
use crate::constant::{LoadableConstant, NameAndType};
use crate::symbols::{ClassSymbol, ModuleSymbol, PackageSymbol, SymbolTable};
use crate::tag::{self, TagSet};
use crate::{ClassPoolError, Result};

/// One slot of the pool index: an entry's tag and the absolute offset of its
/// payload (the byte after the tag).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEntry {
    pub tag: u8,
    pub offset: usize,
}

/// Offset table over a constant pool section, built in a single forward
/// pass that decodes nothing. Entries may reference indices anywhere in the
/// pool, so the whole shape has to be known before any entry is resolved.
///
/// Slot 0 is reserved by the format and stays empty, as does the slot after
/// every Long/Double entry (8-byte constants take two slots).
#[derive(Debug)]
pub struct PoolIndex {
    entries: Vec<Option<RawEntry>>,
}

impl PoolIndex {
    /// Parses the pool section the cursor is positioned at: a u16 count
    /// followed by `count - 1` tagged entries. Leaves the cursor at the
    /// first byte after the pool.
    pub fn parse(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let count = cursor.read_u16()? as usize;
        let mut entries = vec![None; count];

        let mut index = 1;
        while index < count {
            let tag_offset = cursor.position();
            let tag = cursor.read_u8()?;
            entries[index] = Some(RawEntry {
                tag,
                offset: cursor.position(),
            });

            match tag {
                tag::CONSTANT_UTF8 => {
                    let length = cursor.read_u16()? as usize;
                    cursor.skip(length)?;
                }
                tag::CONSTANT_CLASS
                | tag::CONSTANT_STRING
                | tag::CONSTANT_METHOD_TYPE
                | tag::CONSTANT_MODULE
                | tag::CONSTANT_PACKAGE => cursor.skip(2)?,
                tag::CONSTANT_METHOD_HANDLE => cursor.skip(3)?,
                tag::CONSTANT_FIELDREF
                | tag::CONSTANT_METHODREF
                | tag::CONSTANT_INTERFACE_METHODREF
                | tag::CONSTANT_NAME_AND_TYPE
                | tag::CONSTANT_INTEGER
                | tag::CONSTANT_FLOAT
                | tag::CONSTANT_DYNAMIC
                | tag::CONSTANT_INVOKE_DYNAMIC => cursor.skip(4)?,
                tag::CONSTANT_LONG | tag::CONSTANT_DOUBLE => {
                    cursor.skip(8)?;
                    // 8-byte constants take this slot and the next one;
                    // the next index must never resolve.
                    index += 1;
                }
                _ => {
                    return Err(ClassPoolError::MalformedPool {
                        tag,
                        offset: tag_offset,
                    })
                }
            }

            index += 1;
        }

        Ok(Self { entries })
    }

    /// Number of slots, including the reserved slot 0.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    fn entry(&self, index: u16) -> Result<RawEntry> {
        self.entries
            .get(index as usize)
            .copied()
            .flatten()
            .ok_or(ClassPoolError::BadPoolIndex(index))
    }
}

/// A resolved pool value, cached per index.
#[derive(Debug, Clone)]
enum PoolValue {
    Name(Rc<str>),
    Class(Rc<ClassSymbol>),
    Module(Rc<ModuleSymbol>),
    Package(Rc<PackageSymbol>),
    NameAndType(Rc<NameAndType>),
    Constant(LoadableConstant),
}

/// Lazy, memoizing resolver over an indexed constant pool.
///
/// One reader per class file parse; the cache is an arena the shape of the
/// pool index, written at most once per slot. Resolving an index a second
/// time hands back the cached value without touching the buffer again, and
/// `Rc`-backed values come back as the same handle. Not safe for concurrent
/// use; parse different class files with different readers.
pub struct PoolReader<'cf, S> {
    bytes: ByteSource<'cf>,
    index: PoolIndex,
    cache: Vec<Option<PoolValue>>,
    symbols: S,
}

impl<'cf, S: SymbolTable> PoolReader<'cf, S> {
    pub fn new(bytes: ByteSource<'cf>, index: PoolIndex, symbols: S) -> Self {
        let cache = vec![None; index.size()];
        Self {
            bytes,
            index,
            cache,
            symbols,
        }
    }

    /// Indexes the pool section at the cursor and wraps it in a reader.
    pub fn parse(cursor: &mut ByteCursor<'cf>, symbols: S) -> Result<Self> {
        let index = PoolIndex::parse(cursor)?;
        Ok(Self::new(cursor.source(), index, symbols))
    }

    /// Number of slots, including the reserved slot 0.
    pub fn size(&self) -> usize {
        self.index.size()
    }

    pub fn symbols(&self) -> &S {
        &self.symbols
    }

    /// Resolves `index` as a UTF-8 entry and returns the interned name.
    pub fn get_name(&mut self, index: u16) -> Result<Rc<str>> {
        match self.resolve(index, TagSet::UTF8)? {
            PoolValue::Name(name) => Ok(name),
            _ => unreachable!("tag set admits only Utf8 entries"),
        }
    }

    /// Resolves `index` as a Class entry, materializing the symbol through
    /// the symbol table.
    pub fn get_class(&mut self, index: u16) -> Result<Rc<ClassSymbol>> {
        match self.resolve(index, TagSet::CLASS)? {
            PoolValue::Class(class) => Ok(class),
            _ => unreachable!("tag set admits only Class entries"),
        }
    }

    pub fn get_module(&mut self, index: u16) -> Result<Rc<ModuleSymbol>> {
        match self.resolve(index, TagSet::MODULE)? {
            PoolValue::Module(module) => Ok(module),
            _ => unreachable!("tag set admits only Module entries"),
        }
    }

    pub fn get_package(&mut self, index: u16) -> Result<Rc<PackageSymbol>> {
        match self.resolve(index, TagSet::PACKAGE)? {
            PoolValue::Package(package) => Ok(package),
            _ => unreachable!("tag set admits only Package entries"),
        }
    }

    pub fn get_name_and_type(&mut self, index: u16) -> Result<Rc<NameAndType>> {
        match self.resolve(index, TagSet::NAME_AND_TYPE)? {
            PoolValue::NameAndType(pair) => Ok(pair),
            _ => unreachable!("tag set admits only NameAndType entries"),
        }
    }

    /// Resolves `index` as a directly loadable literal (Integer, Float,
    /// Long, Double or String).
    pub fn get_constant(&mut self, index: u16) -> Result<LoadableConstant> {
        match self.resolve(index, TagSet::LITERAL)? {
            PoolValue::Constant(constant) => Ok(constant),
            _ => unreachable!("tag set admits only literal entries"),
        }
    }

    /// Maps the raw modified-UTF-8 payload of the UTF-8 entry at `index`
    /// through `mapper`, without caching anything or touching the symbol
    /// table. For callers that only want the text, such as attribute-name
    /// scans, and must not materialize pool-wide state to get it.
    pub fn peek_name<T>(&self, index: u16, mapper: impl FnOnce(&[u8]) -> T) -> Result<T> {
        let entry = self.expect(index, TagSet::UTF8)?;
        let length = self.bytes.get_u16(entry.offset)? as usize;
        Ok(mapper(self.bytes.get(entry.offset + 2, length)?))
    }

    /// Uncached read of the name behind the Module entry at `index`.
    pub fn peek_module_name<T>(&self, index: u16, mapper: impl FnOnce(&[u8]) -> T) -> Result<T> {
        let entry = self.expect(index, TagSet::MODULE)?;
        let name_index = self.bytes.get_u16(entry.offset)?;
        self.peek_name(name_index, mapper)
    }

    /// Uncached read of the name behind the Class entry at `index`.
    pub fn peek_class_name<T>(&self, index: u16, mapper: impl FnOnce(&[u8]) -> T) -> Result<T> {
        let entry = self.expect(index, TagSet::CLASS)?;
        let name_index = self.bytes.get_u16(entry.offset)?;
        self.peek_name(name_index, mapper)
    }

    fn expect(&self, index: u16, expected: TagSet) -> Result<RawEntry> {
        let entry = self.index.entry(index)?;
        if !expected.contains_tag(entry.tag) {
            return Err(ClassPoolError::UnexpectedTag {
                index,
                actual: entry.tag,
                expected,
            });
        }
        Ok(entry)
    }

    fn resolve(&mut self, index: u16, expected: TagSet) -> Result<PoolValue> {
        let entry = self.expect(index, expected)?;
        if let Some(value) = &self.cache[index as usize] {
            return Ok(value.clone());
        }
        let value = self.decode(entry)?;
        self.cache[index as usize] = Some(value.clone());
        Ok(value)
    }

    /// Decodes an entry's payload. May re-enter [`Self::resolve`] for
    /// referenced indices; each inner resolution completes before this
    /// entry is stored, so same-thread reference chains are fine.
    fn decode(&mut self, entry: RawEntry) -> Result<PoolValue> {
        let value = match entry.tag {
            tag::CONSTANT_UTF8 => {
                let length = self.bytes.get_u16(entry.offset)? as usize;
                let bytes = self.bytes.get(entry.offset + 2, length)?;
                PoolValue::Name(String::from_utf8_lossy(bytes).into())
            }
            tag::CONSTANT_CLASS => {
                let name_index = self.bytes.get_u16(entry.offset)?;
                let name = self.get_name(name_index)?;
                PoolValue::Class(self.symbols.enter_class(name))
            }
            tag::CONSTANT_MODULE => {
                let name_index = self.bytes.get_u16(entry.offset)?;
                let name = self.get_name(name_index)?;
                PoolValue::Module(self.symbols.enter_module(name))
            }
            tag::CONSTANT_PACKAGE => {
                let name_index = self.bytes.get_u16(entry.offset)?;
                let name = self.get_name(name_index)?;
                PoolValue::Package(self.symbols.enter_package(name))
            }
            tag::CONSTANT_NAME_AND_TYPE => {
                let name_index = self.bytes.get_u16(entry.offset)?;
                let descriptor_index = self.bytes.get_u16(entry.offset + 2)?;
                let name = self.get_name(name_index)?;
                let descriptor = self.get_name(descriptor_index)?;
                PoolValue::NameAndType(Rc::new(NameAndType { name, descriptor }))
            }
            tag::CONSTANT_INTEGER => {
                PoolValue::Constant(LoadableConstant::Integer(self.bytes.get_i32(entry.offset)?))
            }
            tag::CONSTANT_FLOAT => {
                PoolValue::Constant(LoadableConstant::Float(self.bytes.get_f32(entry.offset)?))
            }
            tag::CONSTANT_LONG => {
                PoolValue::Constant(LoadableConstant::Long(self.bytes.get_i64(entry.offset)?))
            }
            tag::CONSTANT_DOUBLE => {
                PoolValue::Constant(LoadableConstant::Double(self.bytes.get_f64(entry.offset)?))
            }
            tag::CONSTANT_STRING => {
                let utf8_index = self.bytes.get_u16(entry.offset)?;
                PoolValue::Constant(LoadableConstant::String(self.get_name(utf8_index)?))
            }
            _ => unreachable!("expect() admits only decodable tags"),
        };
        Ok(value)
    }
}
