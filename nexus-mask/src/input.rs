//! Encode inputs and the integer-conversion capability.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::num::{
    NonZeroI8, NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI128, NonZeroIsize, NonZeroU8,
    NonZeroU16, NonZeroU32, NonZeroU64, NonZeroU128, NonZeroUsize,
};

use indexmap::IndexMap;

/// Values that can be coerced to an integer for raw encoding.
///
/// Returning `None` means the value has no integer form; encoding it fails
/// with [`InvalidEncodeInput`](crate::InvalidEncodeInput).
///
/// Implement this on raw flag newtypes to pass them straight to
/// [`FlagMask::encode_raw`](crate::FlagMask::encode_raw):
///
/// ```
/// use nexus_mask::{FlagMask, ToInt};
///
/// #[derive(Debug)]
/// struct OpenFlags(u32);
///
/// impl ToInt for OpenFlags {
///     fn to_int(&self) -> Option<i128> {
///         Some(self.0.into())
///     }
/// }
///
/// let mask = FlagMask::new([("read", 0x1), ("write", 0x2)]);
/// assert_eq!(mask.encode_raw(&OpenFlags(0x7)), Ok(0x3));
/// ```
pub trait ToInt: fmt::Debug {
    /// Integer form of this value, if it has one.
    fn to_int(&self) -> Option<i128>;
}

macro_rules! impl_to_int {
    ($($ty:ty),*) => {
        $(
            impl ToInt for $ty {
                #[inline]
                fn to_int(&self) -> Option<i128> {
                    Some(*self as i128)
                }
            }
        )*
    };
}

impl_to_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, i128, isize);

impl ToInt for u128 {
    #[inline]
    fn to_int(&self) -> Option<i128> {
        i128::try_from(*self).ok()
    }
}

macro_rules! impl_to_int_nonzero {
    ($($ty:ty),*) => {
        $(
            impl ToInt for $ty {
                #[inline]
                fn to_int(&self) -> Option<i128> {
                    self.get().to_int()
                }
            }
        )*
    };
}

impl_to_int_nonzero!(
    NonZeroU8,
    NonZeroU16,
    NonZeroU32,
    NonZeroU64,
    NonZeroU128,
    NonZeroUsize,
    NonZeroI8,
    NonZeroI16,
    NonZeroI32,
    NonZeroI64,
    NonZeroI128,
    NonZeroIsize
);

impl<T: ToInt> ToInt for Option<T> {
    #[inline]
    fn to_int(&self) -> Option<i128> {
        self.as_ref().and_then(ToInt::to_int)
    }
}

impl<T: ToInt + ?Sized> ToInt for &T {
    #[inline]
    fn to_int(&self) -> Option<i128> {
        (**self).to_int()
    }
}

/// Input to [`FlagMask::encode`](crate::FlagMask::encode).
///
/// Usually built with `From`:
///
/// ```
/// use std::collections::HashMap;
/// use nexus_mask::EncodeInput;
///
/// let named = HashMap::from([("foo", true), ("bar", false)]);
/// assert!(matches!(EncodeInput::from(&named), EncodeInput::Named(_)));
/// assert!(matches!(EncodeInput::from(&0x3u32), EncodeInput::Raw(_)));
/// ```
#[derive(Debug)]
pub enum EncodeInput<'a> {
    /// Flag names paired with whether each is set.
    Named(Vec<(&'a str, bool)>),
    /// A value to coerce to an integer, then mask.
    Raw(&'a dyn ToInt),
}

impl<'a> EncodeInput<'a> {
    /// Collects borrowed `(name, set)` pairs, as yielded by iterating a map
    /// by reference.
    pub fn named<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a K, &'a bool)>,
        K: AsRef<str> + ?Sized + 'a,
    {
        Self::Named(
            pairs
                .into_iter()
                .map(|(name, &set)| (AsRef::<str>::as_ref(name), set))
                .collect(),
        )
    }

    /// Wraps a value to coerce through [`ToInt`].
    #[inline]
    pub fn raw<V: ToInt>(value: &'a V) -> Self {
        Self::Raw(value)
    }
}

impl<'a, K: AsRef<str>, S> From<&'a HashMap<K, bool, S>> for EncodeInput<'a> {
    fn from(flags: &'a HashMap<K, bool, S>) -> Self {
        Self::named(flags)
    }
}

impl<'a, K: AsRef<str>> From<&'a BTreeMap<K, bool>> for EncodeInput<'a> {
    fn from(flags: &'a BTreeMap<K, bool>) -> Self {
        Self::named(flags)
    }
}

impl<'a, K: AsRef<str>, S> From<&'a IndexMap<K, bool, S>> for EncodeInput<'a> {
    fn from(flags: &'a IndexMap<K, bool, S>) -> Self {
        Self::named(flags)
    }
}

impl<'a, K: AsRef<str>> From<&'a [(K, bool)]> for EncodeInput<'a> {
    fn from(flags: &'a [(K, bool)]) -> Self {
        Self::named(flags.iter().map(|(name, set)| (name, set)))
    }
}

impl<'a, K: AsRef<str>, const N: usize> From<&'a [(K, bool); N]> for EncodeInput<'a> {
    fn from(flags: &'a [(K, bool); N]) -> Self {
        Self::from(flags.as_slice())
    }
}

impl<'a, K: AsRef<str>> From<&'a Vec<(K, bool)>> for EncodeInput<'a> {
    fn from(flags: &'a Vec<(K, bool)>) -> Self {
        Self::from(flags.as_slice())
    }
}

macro_rules! impl_from_raw {
    ($($ty:ty),*) => {
        $(
            impl<'a> From<&'a $ty> for EncodeInput<'a> {
                #[inline]
                fn from(value: &'a $ty) -> Self {
                    Self::Raw(value)
                }
            }
        )*
    };
}

impl_from_raw!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
