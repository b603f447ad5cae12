//! nbtree is a codec and in-memory tree model for NBT, the named binary tag
//! format used to persist hierarchical game data such as world saves and
//! player inventories.
//!
//! * For parsing raw or compressed bytes into a tree, see [`from_bytes`],
//!   [`from_compressed_bytes`] and [`parse`].
//! * For serializing a tree back to bytes, see [`to_bytes`] and
//!   [`to_compressed_bytes`].
//! * For the tree model itself see [`Value`], [`List`], [`Compound`] and
//!   [`NamedTag`].
//! * For rendering a tree as text see [`print`].
//!
//! Unlike most NBT libraries, the byte order is selectable per call, so the
//! same tree can be read from or written to both the big-endian and
//! little-endian flavours of the format.
//!
//! # Quick example
//!
//! Build a small tree, serialize it, and parse it back:
//!
//! ```
//! use nbtree::{from_bytes, to_bytes, Compound, NamedTag, Value};
//! use nbtree::order::ByteOrder;
//!
//! # fn main() -> nbtree::error::Result<()> {
//! let mut root = Compound::new();
//! root.insert("x", 42i8);
//! root.insert("name", "steve");
//! let tag = NamedTag::new("", Value::Compound(root));
//!
//! let bytes = to_bytes(&tag, ByteOrder::Big)?;
//! let back = from_bytes(&bytes, ByteOrder::Big)?;
//! assert_eq!(tag, back);
//! # Ok(())
//! # }
//! ```

pub mod coder;
pub mod de;
pub mod error;
pub mod order;
pub mod print;
pub mod ser;

mod value;

pub use de::{from_bytes, from_compressed_bytes, parse};
pub use ser::{to_bytes, to_compressed_bytes};
pub use value::*;

#[cfg(test)]
mod test;

/// An NBT tag type. This carries neither the value nor the name of the data.
///
/// The integer values are part of the wire format and must not change.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum Tag {
    /// Marks the end of a Compound.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64.
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// An array of Byte (i8).
    ByteArray = 7,
    /// A Unicode string.
    String = 8,
    /// An ordered sequence of unnamed elements sharing one declared type.
    List = 9,
    /// A record-like structure of named elements.
    Compound = 10,
    /// An array of Int (i32).
    IntArray = 11,
}

// Crates exist to generate this code for us, but would add to our compile
// times. The tag values are a frozen wire contract so writing it out by hand
// is not a burden.
impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12..=u8::MAX => return Err(()),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        tag as u8
    }
}

impl Tag {
    /// The classic textual name of the tag type, eg `TAG_Byte_Array`.
    pub fn name(self) -> &'static str {
        match self {
            Tag::End => "TAG_End",
            Tag::Byte => "TAG_Byte",
            Tag::Short => "TAG_Short",
            Tag::Int => "TAG_Int",
            Tag::Long => "TAG_Long",
            Tag::Float => "TAG_Float",
            Tag::Double => "TAG_Double",
            Tag::ByteArray => "TAG_Byte_Array",
            Tag::String => "TAG_String",
            Tag::List => "TAG_List",
            Tag::Compound => "TAG_Compound",
            Tag::IntArray => "TAG_Int_Array",
        }
    }
}
