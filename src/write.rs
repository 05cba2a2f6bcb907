//! Binary encoder: one [`Document`] tree in, one byte buffer out.
//!
//! Exact inverse of the decoder for every kind. Encoding targets an owned
//! buffer and cannot fail for a well-formed tree; a list's recorded element
//! kind is written as-is, never re-derived from its items.

use std::marker::PhantomData;

use zerocopy::{
    ByteOrder, IntoBytes,
    byteorder::{F32, F64, I16, I32, I64, U16},
};

use crate::{Compound, Document, List, Tag, Value};

/// Encodes a document as one (kind, name, payload) unit with a compound
/// root, the layout [`read_document`](crate::read_document) decodes.
pub fn write_document<O: ByteOrder>(document: &Document) -> Vec<u8> {
    let mut writer = Writer::<O>::new();
    writer.write_u8(Tag::Compound as u8);
    writer.write_string(&document.root_name);
    writer.write_compound(&document.root);
    writer.buf
}

struct Writer<O> {
    buf: Vec<u8>,
    _order: PhantomData<O>,
}

impl<O: ByteOrder> Writer<O> {
    fn new() -> Self {
        Writer {
            buf: Vec::new(),
            _order: PhantomData,
        }
    }

    fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    fn write_i16(&mut self, value: i16) {
        self.buf.extend_from_slice(&I16::<O>::new(value).to_bytes());
    }

    fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&I32::<O>::new(value).to_bytes());
    }

    fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&I64::<O>::new(value).to_bytes());
    }

    fn write_f32(&mut self, value: f32) {
        self.buf.extend_from_slice(&F32::<O>::new(value).to_bytes());
    }

    fn write_f64(&mut self, value: f64) {
        self.buf.extend_from_slice(&F64::<O>::new(value).to_bytes());
    }

    fn write_string(&mut self, value: &str) {
        let encoded = simd_cesu8::mutf8::encode(value);
        // The wire length prefix is u16; longer strings cannot be
        // represented and are cut at the prefix limit.
        let len = encoded.len().min(u16::MAX as usize);
        self.buf.extend_from_slice(&U16::<O>::new(len as u16).to_bytes());
        self.buf.extend_from_slice(&encoded[..len]);
    }

    fn write_payload(&mut self, value: &Value) {
        match value {
            Value::Byte(v) => self.write_u8(*v as u8),
            Value::Short(v) => self.write_i16(*v),
            Value::Int(v) => self.write_i32(*v),
            Value::Long(v) => self.write_i64(*v),
            Value::Float(v) => self.write_f32(*v),
            Value::Double(v) => self.write_f64(*v),
            Value::ByteArray(items) => {
                self.write_i32(items.len() as i32);
                self.buf.extend_from_slice(items.as_bytes());
            }
            Value::String(v) => self.write_string(v),
            Value::List(list) => self.write_list(list),
            Value::Compound(compound) => self.write_compound(compound),
            Value::IntArray(items) => {
                self.write_i32(items.len() as i32);
                for &item in items {
                    self.write_i32(item);
                }
            }
            Value::LongArray(items) => {
                self.write_i32(items.len() as i32);
                for &item in items {
                    self.write_i64(item);
                }
            }
        }
    }

    fn write_list(&mut self, list: &List) {
        self.write_u8(list.element_tag as u8);
        self.write_i32(list.items.len() as i32);
        for item in &list.items {
            self.write_payload(item);
        }
    }

    fn write_compound(&mut self, compound: &Compound) {
        for entry in compound.iter() {
            self.write_u8(entry.value.tag() as u8);
            self.write_string(&entry.name);
            self.write_payload(&entry.value);
        }
        self.write_u8(Tag::End as u8);
    }
}
