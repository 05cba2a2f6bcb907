//! Binary decoder: one byte buffer in, one [`Document`] tree out.
//!
//! The decoder is kind-agnostic recursive descent with a bounds check in
//! front of every read. It is generic over byte order the same way the
//! encoder is; schematic files instantiate it with
//! [`BigEndian`](crate::BigEndian).

use std::marker::PhantomData;

use zerocopy::{
    ByteOrder,
    byteorder::{F32, F64, I16, I32, I64, U16},
};

use crate::{Compound, Document, Error, List, Result, Tag, Value};

/// Compound/list nesting bound. Nesting depth is file-controlled, so the
/// decoder fails fast instead of exhausting the stack.
pub const MAX_DEPTH: usize = 512;

/// Decodes exactly one document from `data`.
///
/// The root payload must be a compound (both schematic dialects have
/// compound roots) and the buffer must hold nothing after it.
pub fn read_document<O: ByteOrder>(data: &[u8]) -> Result<Document> {
    let mut reader = Reader::<O>::new(data);
    let kind = reader.read_u8()?;
    if kind != Tag::Compound as u8 {
        return Err(Error::TagMismatch(Tag::Compound as u8, kind));
    }
    let root_name = reader.read_string()?;
    let root = reader.read_compound(0)?;
    let remaining = reader.remaining();
    if remaining != 0 {
        return Err(Error::TrailingData(remaining));
    }
    Ok(Document { root_name, root })
}

struct Reader<'a, O> {
    data: &'a [u8],
    pos: usize,
    _order: PhantomData<O>,
}

impl<'a, O: ByteOrder> Reader<'a, O> {
    fn new(data: &'a [u8]) -> Self {
        Reader {
            data,
            pos: 0,
            _order: PhantomData,
        }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(count).ok_or(Error::EndOfFile)?;
        if end > self.data.len() {
            return Err(Error::EndOfFile);
        }
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.array::<1>()?[0])
    }

    fn read_i16(&mut self) -> Result<i16> {
        Ok(I16::<O>::from_bytes(self.array()?).get())
    }

    fn read_i32(&mut self) -> Result<i32> {
        Ok(I32::<O>::from_bytes(self.array()?).get())
    }

    fn read_i64(&mut self) -> Result<i64> {
        Ok(I64::<O>::from_bytes(self.array()?).get())
    }

    fn read_f32(&mut self) -> Result<f32> {
        Ok(F32::<O>::from_bytes(self.array()?).get())
    }

    fn read_f64(&mut self) -> Result<f64> {
        Ok(F64::<O>::from_bytes(self.array()?).get())
    }

    /// Array/list length prefix. The wire stores it signed; negative
    /// lengths decode as empty.
    fn read_len(&mut self) -> Result<usize> {
        Ok(self.read_i32()?.max(0) as usize)
    }

    fn read_string(&mut self) -> Result<String> {
        let len = U16::<O>::from_bytes(self.array()?).get() as usize;
        let bytes = self.take(len)?;
        Ok(simd_cesu8::mutf8::decode_lossy(bytes).into_owned())
    }

    fn read_payload(&mut self, tag: Tag, depth: usize) -> Result<Value> {
        Ok(match tag {
            Tag::End => return Err(Error::InvalidTagType(0)),
            Tag::Byte => Value::Byte(self.read_u8()? as i8),
            Tag::Short => Value::Short(self.read_i16()?),
            Tag::Int => Value::Int(self.read_i32()?),
            Tag::Long => Value::Long(self.read_i64()?),
            Tag::Float => Value::Float(self.read_f32()?),
            Tag::Double => Value::Double(self.read_f64()?),
            Tag::ByteArray => {
                let len = self.read_len()?;
                let bytes = self.take(len)?;
                Value::ByteArray(bytes.iter().map(|&b| b as i8).collect())
            }
            Tag::String => Value::String(self.read_string()?),
            Tag::List => Value::List(self.read_list(depth)?),
            Tag::Compound => Value::Compound(self.read_compound(depth)?),
            Tag::IntArray => {
                let len = self.read_len()?;
                self.ensure(len.saturating_mul(4))?;
                let mut items = Vec::with_capacity(len);
                for _ in 0..len {
                    items.push(self.read_i32()?);
                }
                Value::IntArray(items)
            }
            Tag::LongArray => {
                let len = self.read_len()?;
                self.ensure(len.saturating_mul(8))?;
                let mut items = Vec::with_capacity(len);
                for _ in 0..len {
                    items.push(self.read_i64()?);
                }
                Value::LongArray(items)
            }
        })
    }

    fn read_list(&mut self, depth: usize) -> Result<List> {
        if depth >= MAX_DEPTH {
            return Err(Error::DepthLimitExceeded);
        }
        let kind = self.read_u8()?;
        let element_tag = Tag::from_u8(kind).ok_or(Error::InvalidTagType(kind))?;
        let count = self.read_len()?;
        if element_tag == Tag::End {
            // 0 carries no payload; only valid as the kind of an empty list.
            if count > 0 {
                return Err(Error::InvalidTagType(0));
            }
            return Ok(List::new(Tag::End));
        }
        // Every element payload is at least one byte, so a count beyond the
        // remaining bytes can never decode.
        self.ensure(count)?;
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(self.read_payload(element_tag, depth + 1)?);
        }
        Ok(List { element_tag, items })
    }

    fn read_compound(&mut self, depth: usize) -> Result<Compound> {
        if depth >= MAX_DEPTH {
            return Err(Error::DepthLimitExceeded);
        }
        let mut compound = Compound::new();
        loop {
            let kind = self.read_u8()?;
            if kind == Tag::End as u8 {
                return Ok(compound);
            }
            let tag = Tag::from_u8(kind).ok_or(Error::InvalidTagType(kind))?;
            let name = self.read_string()?;
            let value = self.read_payload(tag, depth + 1)?;
            compound.push(name, value);
        }
    }

    fn ensure(&self, count: usize) -> Result<()> {
        if count > self.remaining() {
            return Err(Error::EndOfFile);
        }
        Ok(())
    }
}
