//! Serialization of a tag tree back into bytes: the exact inverse of the
//! parse grammar. A tree parsed from bytes and written back at the same
//! byte order reproduces the input byte for byte.

use crate::coder::{compress, CompressionFormat, Encoder};
use crate::error::{Error, Result};
use crate::order::ByteOrder;
use crate::{NamedTag, Tag, Value};

/// Serialize a tree to uncompressed bytes at the given byte order.
pub fn to_bytes(tag: &NamedTag, order: ByteOrder) -> Result<Vec<u8>> {
    let mut enc = Encoder::new();
    write_named(&mut enc, &tag.name, &tag.value, order)?;
    Ok(enc.into_bytes())
}

/// Serialize a tree and compress the result in one step.
pub fn to_compressed_bytes(
    tag: &NamedTag,
    order: ByteOrder,
    format: CompressionFormat,
) -> Result<Vec<u8>> {
    let bytes = to_bytes(tag, order)?;
    compress(&bytes, format)
}

/// A full named node: type byte, name length and bytes, then the payload.
fn write_named(enc: &mut Encoder, name: &str, value: &Value, order: ByteOrder) -> Result<()> {
    enc.write_u8(value.tag().into())?;
    write_string(enc, name, order)?;
    write_payload(enc, value, order)
}

fn write_string(enc: &mut Encoder, s: &str, order: ByteOrder) -> Result<()> {
    let len = i16::try_from(s.len()).map_err(|_| Error::bespoke("string too long for nbt"))?;
    enc.write_i16(len, order)?;
    enc.write_bytes(s.as_bytes())
}

fn write_len(enc: &mut Encoder, len: usize, order: ByteOrder) -> Result<()> {
    let len = i32::try_from(len).map_err(|_| Error::bespoke("sequence too long for nbt"))?;
    enc.write_i32(len, order)
}

fn write_payload(enc: &mut Encoder, value: &Value, order: ByteOrder) -> Result<()> {
    match value {
        Value::Byte(v) => enc.write_i8(*v),
        Value::Short(v) => enc.write_i16(*v, order),
        Value::Int(v) => enc.write_i32(*v, order),
        Value::Long(v) => enc.write_i64(*v, order),
        Value::Float(v) => enc.write_f32(*v, order),
        Value::Double(v) => enc.write_f64(*v, order),
        Value::ByteArray(bytes) => {
            write_len(enc, bytes.len(), order)?;
            let raw: Vec<u8> = bytes.iter().map(|&b| b as u8).collect();
            enc.write_bytes(&raw)
        }
        Value::String(s) => write_string(enc, s, order),
        Value::List(list) => {
            enc.write_u8(list.element().into())?;
            write_len(enc, list.len(), order)?;
            // Elements are payload only: no per-element type or name.
            for item in list {
                write_payload(enc, item, order)?;
            }
            Ok(())
        }
        Value::Compound(compound) => {
            for (name, item) in compound {
                write_named(enc, name, item, order)?;
            }
            enc.write_u8(Tag::End.into())
        }
        Value::IntArray(ints) => {
            write_len(enc, ints.len(), order)?;
            for i in ints {
                enc.write_i32(*i, order)?;
            }
            Ok(())
        }
    }
}
