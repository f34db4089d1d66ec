// https://docs.oracle.com/javase/specs/jvms/se18/html/jvms-4.html#jvms-4.4

mod access_flags;
mod bytes;
pub mod constant;
mod constant_pool;
mod error;
mod module_name;
mod symbols;
pub mod tag;

pub use access_flags::AccessFlags;
pub use bytes::{ByteCursor, ByteSource};
pub use constant_pool::{PoolIndex, PoolReader, RawEntry};
pub use error::ClassPoolError;
pub use module_name::read_module_name;
pub use symbols::{ClassSymbol, ModuleSymbol, PackageSymbol, SymbolTable, Symtab};
pub use tag::TagSet;

pub type Result<T, E = ClassPoolError> = std::result::Result<T, E>;
