// nexus-mask/src/table.rs

//! Static flag tables declared as enums.

use crate::mask::FlagMask;
use crate::native::NativeType;

/// A static flag table, usually derived from a fieldless enum.
///
/// Derive this on `#[repr(u8)]` / `#[repr(u32)]` / etc enums. Each variant
/// becomes a flag named after the variant in snake_case, valued at its
/// discriminant:
///
/// ```
/// use nexus_mask::{FlagTable, NativeType};
///
/// #[derive(FlagTable, Clone, Copy)]
/// #[repr(u16)]
/// pub enum OpenFlag {
///     Read = 0x1,
///     Write = 0x2,
///     ReadWrite = 0x3,
///     #[flag(name = "excl")]
///     Exclusive = 0x80,
/// }
///
/// let mask = OpenFlag::flag_mask();
/// assert_eq!(mask.native_type(), NativeType::U16);
/// assert_eq!(mask.value_of("read_write"), Some(0x3));
/// assert_eq!(mask.value_of("excl"), Some(0x80));
/// ```
pub trait FlagTable {
    /// Native type of the table, from the enum's repr.
    const NATIVE: NativeType;

    /// `(name, value)` pairs in declaration order.
    fn flags() -> &'static [(&'static str, u64)];

    /// Builds a [`FlagMask`] over this table.
    fn flag_mask() -> FlagMask {
        FlagMask::with_native(Self::flags().iter().copied(), Self::NATIVE)
    }
}
