use byteorder::{BigEndian, ByteOrder};

use crate::{ClassPoolError, Result};

type Endian = BigEndian;

/// Random-access view over a class file's bytes. All multi-byte values in
/// the class file format are big-endian.
#[derive(Debug, Clone, Copy)]
pub struct ByteSource<'a> {
    buf: &'a [u8],
}

impl<'a> ByteSource<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn get(&self, at: usize, len: usize) -> Result<&'a [u8]> {
        at.checked_add(len)
            .and_then(|end| self.buf.get(at..end))
            .ok_or(ClassPoolError::TruncatedPool {
                offset: at,
                want: len,
            })
    }

    pub fn get_u8(&self, at: usize) -> Result<u8> {
        Ok(self.get(at, 1)?[0])
    }

    pub fn get_u16(&self, at: usize) -> Result<u16> {
        Ok(Endian::read_u16(self.get(at, 2)?))
    }

    pub fn get_u32(&self, at: usize) -> Result<u32> {
        Ok(Endian::read_u32(self.get(at, 4)?))
    }

    pub fn get_i32(&self, at: usize) -> Result<i32> {
        Ok(Endian::read_i32(self.get(at, 4)?))
    }

    pub fn get_i64(&self, at: usize) -> Result<i64> {
        Ok(Endian::read_i64(self.get(at, 8)?))
    }

    pub fn get_f32(&self, at: usize) -> Result<f32> {
        Ok(Endian::read_f32(self.get(at, 4)?))
    }

    pub fn get_f64(&self, at: usize) -> Result<f64> {
        Ok(Endian::read_f64(self.get(at, 8)?))
    }
}

/// A [`ByteSource`] plus a position, for the linear passes (header, pool
/// indexing, attribute scanning).
#[derive(Debug)]
pub struct ByteCursor<'a> {
    src: ByteSource<'a>,
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(src: ByteSource<'a>) -> Self {
        Self { src, pos: 0 }
    }

    pub fn source(&self) -> ByteSource<'a> {
        self.src
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn skip(&mut self, len: usize) -> Result<()> {
        // Bound-check now so a bogus length fails here rather than on some
        // later read with a misleading offset.
        self.src.get(self.pos, len)?;
        self.pos += len;
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let v = self.src.get_u8(self.pos)?;
        self.pos += 1;
        Ok(v)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let v = self.src.get_u16(self.pos)?;
        self.pos += 2;
        Ok(v)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let v = self.src.get_u32(self.pos)?;
        self.pos += 4;
        Ok(v)
    }
}
