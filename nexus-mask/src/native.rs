//! Native integer descriptors.

use core::ffi::{c_int, c_long, c_uint, c_ulong};
use core::fmt;
use core::str::FromStr;

use crate::error::ParseNativeTypeError;

/// Width and signedness of the integer a mask crosses the foreign boundary as.
///
/// The engine itself computes with `u64`. The descriptor tells whoever binds
/// the mask to a foreign signature which scalar to use.
///
/// # Example
///
/// ```
/// use nexus_mask::NativeType;
///
/// assert_eq!(NativeType::default(), NativeType::UINT);
/// assert_eq!(NativeType::of::<u16>(), NativeType::U16);
/// assert_eq!(NativeType::U16.mask(), 0xFFFF);
/// assert_eq!("ushort".parse::<NativeType>().unwrap(), NativeType::U16);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NativeType {
    bits: u32,
    signed: bool,
}

impl NativeType {
    /// `uint8_t`
    pub const U8: Self = Self::new(8, false);
    /// `uint16_t`
    pub const U16: Self = Self::new(16, false);
    /// `uint32_t`
    pub const U32: Self = Self::new(32, false);
    /// `uint64_t`
    pub const U64: Self = Self::new(64, false);
    /// `int8_t`
    pub const I8: Self = Self::new(8, true);
    /// `int16_t`
    pub const I16: Self = Self::new(16, true);
    /// `int32_t`
    pub const I32: Self = Self::new(32, true);
    /// `int64_t`
    pub const I64: Self = Self::new(64, true);

    /// C `unsigned int` on this platform. The default.
    pub const UINT: Self = Self::new(c_uint::BITS, false);
    /// C `int` on this platform.
    pub const INT: Self = Self::new(c_int::BITS, true);
    /// C `unsigned long` on this platform.
    pub const ULONG: Self = Self::new(c_ulong::BITS, false);
    /// C `long` on this platform.
    pub const LONG: Self = Self::new(c_long::BITS, true);
    /// `size_t`
    pub const USIZE: Self = Self::new(usize::BITS, false);
    /// `ssize_t`
    pub const ISIZE: Self = Self::new(isize::BITS, true);

    /// Creates a descriptor of `bits` width.
    ///
    /// # Panics
    ///
    /// Panics if `bits` is not 8, 16, 32 or 64.
    #[inline]
    pub const fn new(bits: u32, signed: bool) -> Self {
        assert!(
            matches!(bits, 8 | 16 | 32 | 64),
            "native width must be 8, 16, 32 or 64 bits"
        );
        Self { bits, signed }
    }

    /// Descriptor for primitive integer `T`.
    #[inline]
    pub const fn of<T: Native>() -> Self {
        T::NATIVE
    }

    /// Width in bits.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.bits
    }

    /// Width in bytes.
    #[inline]
    pub const fn size(self) -> usize {
        (self.bits / 8) as usize
    }

    /// Whether the foreign side reads the value as signed.
    #[inline]
    pub const fn is_signed(self) -> bool {
        self.signed
    }

    /// All ones across the width.
    #[inline]
    pub const fn mask(self) -> u64 {
        if self.bits == u64::BITS {
            !0
        } else {
            (1 << self.bits) - 1
        }
    }

    /// Returns true if `value` has no bits above the width.
    #[inline]
    pub const fn fits(self, value: u64) -> bool {
        value & !self.mask() == 0
    }

    fn name(self) -> &'static str {
        match (self.bits, self.signed) {
            (8, false) => "uint8",
            (16, false) => "uint16",
            (32, false) => "uint32",
            (64, false) => "uint64",
            (8, true) => "int8",
            (16, true) => "int16",
            (32, true) => "int32",
            _ => "int64",
        }
    }
}

impl Default for NativeType {
    fn default() -> Self {
        Self::UINT
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NativeType {
    type Err = ParseNativeTypeError;

    /// Parses Rust (`u16`), fixed-width (`uint16`) and C (`ushort`) names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let native = match s {
            "u8" | "uint8" | "uchar" => Self::U8,
            "u16" | "uint16" | "ushort" => Self::U16,
            "u32" | "uint32" => Self::U32,
            "u64" | "uint64" | "ulong_long" => Self::U64,
            "i8" | "int8" | "char" => Self::I8,
            "i16" | "int16" | "short" => Self::I16,
            "i32" | "int32" => Self::I32,
            "i64" | "int64" | "long_long" => Self::I64,
            "uint" => Self::UINT,
            "int" => Self::INT,
            "ulong" => Self::ULONG,
            "long" => Self::LONG,
            "usize" | "size_t" => Self::USIZE,
            "isize" | "ssize_t" => Self::ISIZE,
            _ => {
                return Err(ParseNativeTypeError {
                    name: s.to_owned(),
                });
            }
        };
        Ok(native)
    }
}

/// Primitive integers with a known [`NativeType`].
pub trait Native: Copy {
    /// Descriptor for this type.
    const NATIVE: NativeType;
}

macro_rules! impl_native {
    ($($ty:ty),*) => {
        $(
            impl Native for $ty {
                const NATIVE: NativeType = NativeType::new(<$ty>::BITS, <$ty>::MIN != 0);
            }
        )*
    };
}

impl_native!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_c_uint() {
        let native = NativeType::default();
        assert_eq!(native.bits(), c_uint::BITS);
        assert!(!native.is_signed());
    }

    #[test]
    fn of_primitives() {
        assert_eq!(NativeType::of::<u8>(), NativeType::U8);
        assert_eq!(NativeType::of::<i16>(), NativeType::I16);
        assert_eq!(NativeType::of::<u64>(), NativeType::U64);
        assert_eq!(NativeType::of::<usize>(), NativeType::USIZE);
        assert!(NativeType::of::<isize>().is_signed());
    }

    #[test]
    fn masks() {
        assert_eq!(NativeType::U8.mask(), 0xFF);
        assert_eq!(NativeType::I16.mask(), 0xFFFF);
        assert_eq!(NativeType::U32.mask(), 0xFFFF_FFFF);
        assert_eq!(NativeType::U64.mask(), u64::MAX);
    }

    #[test]
    fn fits() {
        assert!(NativeType::U8.fits(0xFF));
        assert!(!NativeType::U8.fits(0x100));
        assert!(NativeType::U64.fits(u64::MAX));
    }

    #[test]
    fn sizes() {
        assert_eq!(NativeType::U8.size(), 1);
        assert_eq!(NativeType::I32.size(), 4);
        assert_eq!(NativeType::U64.size(), 8);
    }

    #[test]
    #[should_panic(expected = "native width must be 8, 16, 32 or 64 bits")]
    fn odd_width_panics() {
        let _ = NativeType::new(12, false);
    }

    #[test]
    fn display_parse_roundtrip() {
        for native in [
            NativeType::U8,
            NativeType::U16,
            NativeType::U32,
            NativeType::U64,
            NativeType::I8,
            NativeType::I16,
            NativeType::I32,
            NativeType::I64,
        ] {
            let name = native.to_string();
            assert_eq!(name.parse::<NativeType>(), Ok(native));
        }
    }

    #[test]
    fn parse_c_names() {
        assert_eq!("uint".parse::<NativeType>(), Ok(NativeType::UINT));
        assert_eq!("ushort".parse::<NativeType>(), Ok(NativeType::U16));
        assert_eq!("ulong".parse::<NativeType>(), Ok(NativeType::ULONG));
        assert_eq!("size_t".parse::<NativeType>(), Ok(NativeType::USIZE));
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(
            "float".parse::<NativeType>(),
            Err(ParseNativeTypeError {
                name: "float".into()
            })
        );
    }
}
