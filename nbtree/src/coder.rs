//! The byte-level encoder and decoder the parser and writer are built on,
//! plus whole-buffer compression and file helpers.
//!
//! Encoding and decoding are deliberately split into two types rather than
//! one mode-tagged buffer. An [`Encoder`] only ever appends at its tail; a
//! [`Decoder`] only ever reads forward. Cross-mode misuse is then impossible
//! to express.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use byteorder::{BigEndian, ByteOrder as _, LittleEndian, WriteBytesExt};
use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;
use log::debug;

use crate::error::{Error, Result};
use crate::order::ByteOrder;

/// Starting capacity for a fresh encode buffer. Growth from there is the
/// usual geometric doubling, giving amortized O(1) appends.
const INITIAL_CAPACITY: usize = 128;

/// Magic bytes at the start of a gzip stream.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// An append-only byte buffer with byte-order-aware primitive writes.
///
/// Note that any slice previously taken from the buffer cannot outlive a
/// subsequent write; the borrow checker enforces what the format's growable
/// buffer contract only documents.
#[derive(Debug, Default)]
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    pub fn new() -> Encoder {
        Encoder {
            buf: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.buf.write_u8(value)?;
        Ok(())
    }

    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.buf.write_i8(value)?;
        Ok(())
    }

    pub fn write_i16(&mut self, value: i16, order: ByteOrder) -> Result<()> {
        match order {
            ByteOrder::Big => self.buf.write_i16::<BigEndian>(value)?,
            ByteOrder::Little => self.buf.write_i16::<LittleEndian>(value)?,
        }
        Ok(())
    }

    pub fn write_i32(&mut self, value: i32, order: ByteOrder) -> Result<()> {
        match order {
            ByteOrder::Big => self.buf.write_i32::<BigEndian>(value)?,
            ByteOrder::Little => self.buf.write_i32::<LittleEndian>(value)?,
        }
        Ok(())
    }

    pub fn write_i64(&mut self, value: i64, order: ByteOrder) -> Result<()> {
        match order {
            ByteOrder::Big => self.buf.write_i64::<BigEndian>(value)?,
            ByteOrder::Little => self.buf.write_i64::<LittleEndian>(value)?,
        }
        Ok(())
    }

    pub fn write_f32(&mut self, value: f32, order: ByteOrder) -> Result<()> {
        match order {
            ByteOrder::Big => self.buf.write_f32::<BigEndian>(value)?,
            ByteOrder::Little => self.buf.write_f32::<LittleEndian>(value)?,
        }
        Ok(())
    }

    pub fn write_f64(&mut self, value: f64, order: ByteOrder) -> Result<()> {
        match order {
            ByteOrder::Big => self.buf.write_f64::<BigEndian>(value)?,
            ByteOrder::Little => self.buf.write_f64::<LittleEndian>(value)?,
        }
        Ok(())
    }

    /// Append raw bytes verbatim, with no reordering.
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.buf.write_all(data)?;
        Ok(())
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Consume the encoder, compressing everything written so far.
    pub fn into_compressed(self, format: CompressionFormat) -> Result<Vec<u8>> {
        compress(&self.buf, format)
    }
}

/// A forward-only reader over a byte slice with byte-order-aware primitive
/// reads. Reading past the end of the input is a recoverable
/// [`Error::UnexpectedEof`], never an out-of-bounds access.
#[derive(Debug)]
pub struct Decoder<'a> {
    data: &'a [u8],
    cursor: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Decoder<'a> {
        Decoder { data, cursor: 0 }
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(Error::UnexpectedEof);
        }
        let slice = &self.data[self.cursor..self.cursor + n];
        self.cursor += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.take(1)?[0] as i8)
    }

    pub fn read_i16(&mut self, order: ByteOrder) -> Result<i16> {
        let s = self.take(2)?;
        Ok(match order {
            ByteOrder::Big => BigEndian::read_i16(s),
            ByteOrder::Little => LittleEndian::read_i16(s),
        })
    }

    pub fn read_i32(&mut self, order: ByteOrder) -> Result<i32> {
        let s = self.take(4)?;
        Ok(match order {
            ByteOrder::Big => BigEndian::read_i32(s),
            ByteOrder::Little => LittleEndian::read_i32(s),
        })
    }

    pub fn read_i64(&mut self, order: ByteOrder) -> Result<i64> {
        let s = self.take(8)?;
        Ok(match order {
            ByteOrder::Big => BigEndian::read_i64(s),
            ByteOrder::Little => LittleEndian::read_i64(s),
        })
    }

    pub fn read_f32(&mut self, order: ByteOrder) -> Result<f32> {
        let s = self.take(4)?;
        Ok(match order {
            ByteOrder::Big => BigEndian::read_f32(s),
            ByteOrder::Little => LittleEndian::read_f32(s),
        })
    }

    pub fn read_f64(&mut self, order: ByteOrder) -> Result<f64> {
        let s = self.take(8)?;
        Ok(match order {
            ByteOrder::Big => BigEndian::read_f64(s),
            ByteOrder::Little => LittleEndian::read_f64(s),
        })
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.take(len)
    }
}

/// How to wrap a DEFLATE stream when compressing a whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// gzip container, the usual wrapping for level.dat-style files.
    Gzip,
    /// Plain zlib wrapping, the usual wrapping for chunk data.
    Zlib,
}

impl CompressionFormat {
    /// Detect the wrapping of a compressed buffer from its stream header.
    /// Anything not starting with the gzip magic is taken to be zlib.
    pub fn sniff(data: &[u8]) -> CompressionFormat {
        if data.starts_with(&GZIP_MAGIC) {
            CompressionFormat::Gzip
        } else {
            CompressionFormat::Zlib
        }
    }
}

/// DEFLATE-compress an entire buffer, fully finishing the stream.
pub fn compress(data: &[u8], format: CompressionFormat) -> Result<Vec<u8>> {
    debug!("compressing {} bytes as {:?}", data.len(), format);
    let out = Vec::with_capacity(INITIAL_CAPACITY);
    let compression_err = |e: std::io::Error| Error::Compression(e.to_string());
    match format {
        CompressionFormat::Gzip => {
            let mut enc = GzEncoder::new(out, Compression::default());
            enc.write_all(data).map_err(compression_err)?;
            enc.finish().map_err(compression_err)
        }
        CompressionFormat::Zlib => {
            let mut enc = ZlibEncoder::new(out, Compression::default());
            enc.write_all(data).map_err(compression_err)?;
            enc.finish().map_err(compression_err)
        }
    }
}

/// Inflate an entire buffer, auto-detecting the gzip versus zlib wrapping
/// from the stream header. Malformed input, a checksum mismatch, or a
/// stream that ends early all fail with [`Error::Compression`].
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let res = match CompressionFormat::sniff(data) {
        CompressionFormat::Gzip => GzDecoder::new(data).read_to_end(&mut out),
        CompressionFormat::Zlib => ZlibDecoder::new(data).read_to_end(&mut out),
    };
    res.map_err(|e| Error::Compression(e.to_string()))?;
    debug!("decompressed {} bytes to {}", data.len(), out.len());
    Ok(out)
}

/// Read a whole file into memory.
pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    fs::read(path.as_ref()).map_err(|e| Error::Io(e.to_string()))
}

/// Write a whole buffer to a file. The bytes go to a sibling temp file
/// first and are renamed into place, so a failed write never leaves a
/// partially written destination.
pub fn save_file(data: &[u8], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut tmp_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .ok_or_else(|| Error::Io(format!("{}: not a file path", path.display())))?;
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    if let Err(e) = fs::write(&tmp, data) {
        let _ = fs::remove_file(&tmp);
        return Err(Error::Io(e.to_string()));
    }
    fs::rename(&tmp, path).map_err(|e| Error::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_roundtrip_both_orders() {
        for order in [ByteOrder::Big, ByteOrder::Little] {
            let mut enc = Encoder::new();
            enc.write_u8(0xab).unwrap();
            enc.write_i8(-5).unwrap();
            enc.write_i16(-12345, order).unwrap();
            enc.write_i32(0x01020304, order).unwrap();
            enc.write_i64(i64::MIN + 3, order).unwrap();
            enc.write_f32(1.25, order).unwrap();
            enc.write_f64(-2.5, order).unwrap();
            enc.write_bytes(b"abc").unwrap();
            let bytes = enc.into_bytes();

            let mut dec = Decoder::new(&bytes);
            assert_eq!(dec.read_u8().unwrap(), 0xab);
            assert_eq!(dec.read_i8().unwrap(), -5);
            assert_eq!(dec.read_i16(order).unwrap(), -12345);
            assert_eq!(dec.read_i32(order).unwrap(), 0x01020304);
            assert_eq!(dec.read_i64(order).unwrap(), i64::MIN + 3);
            assert_eq!(dec.read_f32(order).unwrap(), 1.25);
            assert_eq!(dec.read_f64(order).unwrap(), -2.5);
            assert_eq!(dec.read_bytes(3).unwrap(), b"abc");
            assert_eq!(dec.remaining(), 0);
        }
    }

    #[test]
    fn encode_is_byte_exact() {
        let mut enc = Encoder::new();
        enc.write_i32(0x01020304, ByteOrder::Big).unwrap();
        enc.write_i32(0x01020304, ByteOrder::Little).unwrap();
        assert_eq!(
            enc.into_bytes(),
            vec![0x01, 0x02, 0x03, 0x04, 0x04, 0x03, 0x02, 0x01]
        );
    }

    #[test]
    fn decode_past_end_errors() {
        let mut dec = Decoder::new(&[0x00, 0x01]);
        assert_eq!(dec.read_i32(ByteOrder::Big), Err(Error::UnexpectedEof));
        // A failed read consumes nothing.
        assert_eq!(dec.remaining(), 2);
        assert_eq!(dec.read_i16(ByteOrder::Big).unwrap(), 1);
        assert_eq!(dec.read_u8(), Err(Error::UnexpectedEof));
    }

    #[test]
    fn decode_bytes_past_end_errors() {
        let mut dec = Decoder::new(b"abc");
        assert_eq!(dec.read_bytes(4), Err(Error::UnexpectedEof));
        assert_eq!(dec.read_bytes(3).unwrap(), b"abc");
    }

    #[test]
    fn compression_roundtrip() {
        let cases: [&[u8]; 3] = [b"", b"hello world", &[0u8; 4096]];
        for data in cases {
            for format in [CompressionFormat::Gzip, CompressionFormat::Zlib] {
                let packed = compress(data, format).unwrap();
                assert_eq!(decompress(&packed).unwrap(), data);
            }
        }
    }

    #[test]
    fn compress_gzip_has_magic() {
        let packed = compress(b"data", CompressionFormat::Gzip).unwrap();
        assert_eq!(&packed[..2], &GZIP_MAGIC);
        let packed = compress(b"data", CompressionFormat::Zlib).unwrap();
        assert_ne!(&packed[..2], &GZIP_MAGIC);
    }

    #[test]
    fn decompress_garbage_errors() {
        assert!(matches!(
            decompress(b"definitely not deflate"),
            Err(Error::Compression(_))
        ));
        // A gzip header with a truncated body must not "succeed".
        let mut truncated = compress(b"some reasonable payload", CompressionFormat::Gzip).unwrap();
        truncated.truncate(truncated.len() / 2);
        assert!(matches!(
            decompress(&truncated),
            Err(Error::Compression(_))
        ));
    }

    #[test]
    fn sniff_detects_container() {
        let gz = compress(b"data", CompressionFormat::Gzip).unwrap();
        assert_eq!(CompressionFormat::sniff(&gz), CompressionFormat::Gzip);
        let zl = compress(b"data", CompressionFormat::Zlib).unwrap();
        assert_eq!(CompressionFormat::sniff(&zl), CompressionFormat::Zlib);
    }

    #[test]
    fn save_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.nbt");
        save_file(b"\x0a\x00\x00\x00", &path).unwrap();
        assert_eq!(load_file(&path).unwrap(), b"\x0a\x00\x00\x00");
        // The rename must have consumed the temp file.
        assert!(!dir.path().join("doc.nbt.tmp").exists());
    }

    #[test]
    fn save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.nbt");
        save_file(b"old contents", &path).unwrap();
        save_file(b"new", &path).unwrap();
        assert_eq!(load_file(&path).unwrap(), b"new");
    }

    #[test]
    fn load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let res = load_file(dir.path().join("no-such-file.nbt"));
        assert!(matches!(res, Err(Error::Io(_))));
    }

    #[test]
    fn failed_save_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        // The parent directory does not exist, so the temp write fails.
        let path = dir.path().join("missing").join("doc.nbt");
        assert!(matches!(save_file(b"data", &path), Err(Error::Io(_))));
        assert!(!path.exists());
        assert!(!dir.path().join("missing").join("doc.nbt.tmp").exists());
    }

    #[test]
    fn save_to_path_without_file_name_errors() {
        assert!(matches!(save_file(b"data", "/"), Err(Error::Io(_))));
    }

    #[test]
    fn encoder_into_compressed() {
        let mut enc = Encoder::new();
        enc.write_bytes(b"payload").unwrap();
        let packed = enc.into_compressed(CompressionFormat::Zlib).unwrap();
        assert_eq!(decompress(&packed).unwrap(), b"payload");
    }
}
