//! Byte-order control for the wire format.
//!
//! NBT is normally big-endian, but the pocket flavour of the format and some
//! tooling use little-endian. Every encode and decode operation takes a
//! [`ByteOrder`] so a single tree can round-trip through either layout.
//!
//! The `swap*` and `reorder_*` helpers work on values already in hand. The
//! [`Encoder`](crate::coder::Encoder) and [`Decoder`](crate::coder::Decoder)
//! reorder at the byte-slice level through `byteorder` instead, so these are
//! for callers fixing up individual values in memory.

/// The byte order used to lay out multi-byte integers and floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Big,
    Little,
}

impl ByteOrder {
    /// The byte order of the machine we are running on, known at compile
    /// time.
    pub const fn native() -> ByteOrder {
        if cfg!(target_endian = "little") {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        }
    }

    pub fn is_native(self) -> bool {
        self == ByteOrder::native()
    }
}

/// Unconditionally reverse the byte order of a 16-bit value.
pub fn swap16(value: u16) -> u16 {
    value.swap_bytes()
}

/// Unconditionally reverse the byte order of a 32-bit value.
pub fn swap32(value: u32) -> u32 {
    value.swap_bytes()
}

/// Unconditionally reverse the byte order of a 64-bit value.
pub fn swap64(value: u64) -> u64 {
    value.swap_bytes()
}

/// Return `value` unchanged if `order` is the native order, otherwise with
/// its bytes reversed.
pub fn reorder_i16(value: i16, order: ByteOrder) -> i16 {
    if order.is_native() {
        value
    } else {
        value.swap_bytes()
    }
}

/// See [`reorder_i16`].
pub fn reorder_i32(value: i32, order: ByteOrder) -> i32 {
    if order.is_native() {
        value
    } else {
        value.swap_bytes()
    }
}

/// See [`reorder_i16`].
pub fn reorder_i64(value: i64, order: ByteOrder) -> i64 {
    if order.is_native() {
        value
    } else {
        value.swap_bytes()
    }
}

/// Floats are reordered through their raw bit pattern, never numerically.
pub fn reorder_f32(value: f32, order: ByteOrder) -> f32 {
    f32::from_bits(reorder_i32(value.to_bits() as i32, order) as u32)
}

/// See [`reorder_f32`].
pub fn reorder_f64(value: f64, order: ByteOrder) -> f64 {
    f64::from_bits(reorder_i64(value.to_bits() as i64, order) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_is_involution() {
        assert_eq!(swap16(swap16(0x1234)), 0x1234);
        assert_eq!(swap32(swap32(0x12345678)), 0x12345678);
        assert_eq!(swap64(swap64(0x123456789abcdef0)), 0x123456789abcdef0);
    }

    #[test]
    fn swap_reverses_bytes() {
        assert_eq!(swap16(0x1234), 0x3412);
        assert_eq!(swap32(0x12345678), 0x78563412);
        assert_eq!(swap64(0x0102030405060708), 0x0807060504030201);
    }

    #[test]
    fn reorder_native_is_identity() {
        let native = ByteOrder::native();
        assert_eq!(reorder_i16(0x1234, native), 0x1234);
        assert_eq!(reorder_i32(0x12345678, native), 0x12345678);
        assert_eq!(reorder_i64(0x0102030405060708, native), 0x0102030405060708);
        assert_eq!(reorder_f32(1.5, native), 1.5);
        assert_eq!(reorder_f64(2.25, native), 2.25);
    }

    #[test]
    fn double_reorder_is_identity() {
        for order in [ByteOrder::Big, ByteOrder::Little] {
            assert_eq!(reorder_i16(reorder_i16(-12345, order), order), -12345);
            assert_eq!(reorder_i32(reorder_i32(-1, order), order), -1);
            assert_eq!(
                reorder_i64(reorder_i64(i64::MIN + 7, order), order),
                i64::MIN + 7
            );
            let f = reorder_f32(reorder_f32(3.25, order), order);
            assert_eq!(f.to_bits(), 3.25f32.to_bits());
            let d = reorder_f64(reorder_f64(-0.125, order), order);
            assert_eq!(d.to_bits(), (-0.125f64).to_bits());
        }
    }

    #[test]
    fn float_reorder_uses_bit_pattern() {
        let non_native = if ByteOrder::native() == ByteOrder::Big {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        };
        assert_eq!(
            reorder_f32(1.0, non_native).to_bits(),
            1.0f32.to_bits().swap_bytes()
        );
        assert_eq!(
            reorder_f64(-2.5, non_native).to_bits(),
            (-2.5f64).to_bits().swap_bytes()
        );
    }
}
