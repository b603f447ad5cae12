//! Parsing of raw bytes into a tag tree.
//!
//! The parser is a single forward pass over a [`Decoder`] with one
//! recursive production per node and no backtracking. All failure modes of
//! untrusted input come back as `Err`: truncation, unknown tag bytes,
//! non-unicode strings, and malformed compressed streams.
//!
//! Length fields are validated against the remaining input before any
//! allocation happens, so a few bytes of input claiming a multi-gigabyte
//! array is rejected up front rather than exhausting memory.

use log::debug;

use crate::coder::{decompress, Decoder};
use crate::error::{Error, Result};
use crate::order::ByteOrder;
use crate::{Compound, List, NamedTag, Tag, Value};

/// Parse a full NBT document, optionally decompressing it first
/// (gzip/zlib auto-detected).
pub fn parse(data: &[u8], order: ByteOrder, compressed: bool) -> Result<NamedTag> {
    if compressed {
        from_compressed_bytes(data, order)
    } else {
        from_bytes(data, order)
    }
}

/// Parse an uncompressed NBT document into a tree.
pub fn from_bytes(data: &[u8], order: ByteOrder) -> Result<NamedTag> {
    debug!("parsing {} bytes, {:?} order", data.len(), order);
    let mut dec = Decoder::new(data);
    let tag = read_tag(&mut dec)?;
    if tag == Tag::End {
        return Err(Error::NoRootTag);
    }
    let name = read_string(&mut dec, order)?;
    let value = read_payload(&mut dec, tag, order)?;
    Ok(NamedTag { name, value })
}

/// Decompress (auto-detecting gzip versus zlib) and parse an NBT document.
pub fn from_compressed_bytes(data: &[u8], order: ByteOrder) -> Result<NamedTag> {
    let raw = decompress(data)?;
    from_bytes(&raw, order)
}

fn read_tag(dec: &mut Decoder) -> Result<Tag> {
    let b = dec.read_u8()?;
    Tag::try_from(b).map_err(|_| Error::InvalidTag(b))
}

fn read_string(dec: &mut Decoder, order: ByteOrder) -> Result<String> {
    let len = dec.read_i16(order)?;
    let len = usize::try_from(len).map_err(|_| Error::bespoke("negative string length"))?;
    let bytes = dec.read_bytes(len)?;
    String::from_utf8(bytes.to_vec()).map_err(|_| Error::NonUnicode)
}

/// Read an i32 length field for a sequence whose elements encode to at
/// least `elem_size` bytes, rejecting it if the input cannot possibly hold
/// that many elements.
fn read_len(dec: &mut Decoder, order: ByteOrder, elem_size: usize) -> Result<usize> {
    let len = dec.read_i32(order)?;
    let len = usize::try_from(len).map_err(|_| Error::bespoke(format!("negative length: {}", len)))?;
    if len.saturating_mul(elem_size) > dec.remaining() {
        return Err(Error::UnexpectedEof);
    }
    Ok(len)
}

/// Minimum number of encoded bytes any payload of the given tag occupies.
fn min_payload_size(tag: Tag) -> usize {
    match tag {
        Tag::End => 0,
        Tag::Byte => 1,
        Tag::Short => 2,
        Tag::Int => 4,
        Tag::Long => 8,
        Tag::Float => 4,
        Tag::Double => 8,
        Tag::ByteArray => 4,
        Tag::String => 2,
        Tag::List => 5,
        Tag::Compound => 1,
        Tag::IntArray => 4,
    }
}

fn read_payload(dec: &mut Decoder, tag: Tag, order: ByteOrder) -> Result<Value> {
    Ok(match tag {
        // An End payload is never requested: compounds consume the marker
        // themselves and an End-typed list can only have zero elements.
        Tag::End => return Err(Error::InvalidTag(0)),
        Tag::Byte => Value::Byte(dec.read_i8()?),
        Tag::Short => Value::Short(dec.read_i16(order)?),
        Tag::Int => Value::Int(dec.read_i32(order)?),
        Tag::Long => Value::Long(dec.read_i64(order)?),
        Tag::Float => Value::Float(dec.read_f32(order)?),
        Tag::Double => Value::Double(dec.read_f64(order)?),
        Tag::ByteArray => {
            let len = read_len(dec, order, 1)?;
            let bytes = dec.read_bytes(len)?;
            Value::ByteArray(bytes.iter().map(|&b| b as i8).collect())
        }
        Tag::String => Value::String(read_string(dec, order)?),
        Tag::List => {
            let element = read_tag(dec)?;
            let count = read_len(dec, order, min_payload_size(element))?;
            let mut list = List::new(element);
            for _ in 0..count {
                list.push(read_payload(dec, element, order)?)?;
            }
            Value::List(list)
        }
        Tag::Compound => {
            let mut compound = Compound::new();
            loop {
                let child = read_tag(dec)?;
                if child == Tag::End {
                    break;
                }
                let name = read_string(dec, order)?;
                let value = read_payload(dec, child, order)?;
                compound.insert(name, value);
            }
            Value::Compound(compound)
        }
        Tag::IntArray => {
            let len = read_len(dec, order, 4)?;
            let mut ints = Vec::with_capacity(len);
            for _ in 0..len {
                ints.push(dec.read_i32(order)?);
            }
            Value::IntArray(ints)
        }
    })
}
