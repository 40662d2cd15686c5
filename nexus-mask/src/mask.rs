//! Named flag table packed into a native integer.

use std::borrow::Borrow;

use indexmap::IndexMap;

use crate::decoded::Decoded;
use crate::error::InvalidEncodeInput;
use crate::input::{EncodeInput, ToInt};
use crate::native::NativeType;
use crate::trace;

/// A named flag table bound to a native integer type.
///
/// Built once from `(name, value)` pairs, then only queried. Values are
/// usually single bits, but any non-negative value is accepted, so
/// combination constants (`RDWR = READ | WRITE`) can be named alongside the
/// bits they cover.
///
/// Conversions are permissive: unknown names are skipped when encoding and
/// unknown bits are dropped in both directions. Foreign headers routinely
/// grow flags before a table is updated.
///
/// # Example
///
/// ```
/// use nexus_mask::FlagMask;
///
/// let mask = FlagMask::new([("read", 0x1), ("write", 0x2), ("append", 0x8)]);
///
/// // Pack
/// let raw = mask.encode_flags([("read", true), ("append", true)]);
/// assert_eq!(raw, 0x9);
///
/// // Unpack
/// let flags = mask.decode(0x3);
/// assert!(flags.is_set("read"));
/// assert!(flags.is_set("write"));
/// assert!(!flags.is_set("append"));
/// ```
#[derive(Clone, Debug)]
pub struct FlagMask {
    flags: IndexMap<String, u64>,
    /// Value to index into `flags`. Last name wins on shared values.
    bit_to_name: IndexMap<u64, usize>,
    known_bits: u64,
    native: NativeType,
}

/// Two masks are equal when they share a native type and list the same
/// flags in the same order. Order decides which name a shared value looks
/// up to, so reordered tables are not equal.
impl PartialEq for FlagMask {
    fn eq(&self, other: &Self) -> bool {
        self.native == other.native && self.flags.iter().eq(other.flags.iter())
    }
}

impl Eq for FlagMask {}

impl FlagMask {
    /// Builds a mask over the default native type (C `unsigned int`).
    pub fn new<I, K>(flags: I) -> Self
    where
        I: IntoIterator<Item = (K, u64)>,
        K: Into<String>,
    {
        Self::with_native(flags, NativeType::default())
    }

    /// Builds a mask over `native`.
    ///
    /// Never fails. Flags sharing a value are all kept; lookup by that value
    /// resolves to the last one. Repeating a name keeps its first position
    /// and its last value.
    pub fn with_native<I, K>(flags: I, native: NativeType) -> Self
    where
        I: IntoIterator<Item = (K, u64)>,
        K: Into<String>,
    {
        let flags: IndexMap<String, u64> = flags
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect();

        let mut bit_to_name = IndexMap::with_capacity(flags.len());
        let mut known_bits = 0;
        for (index, (name, &value)) in flags.iter().enumerate() {
            known_bits |= value;
            if let Some(replaced) = bit_to_name.insert(value, index) {
                if let Some((replaced, _)) = flags.get_index(replaced) {
                    trace::trace_value_collision(value, replaced, name);
                }
            }
        }
        trace::trace_table_built(flags.len(), bit_to_name.len(), known_bits);

        Self {
            flags,
            bit_to_name,
            known_bits,
            native,
        }
    }

    /// Native type the packed value crosses the foreign boundary as.
    #[inline]
    pub fn native_type(&self) -> NativeType {
        self.native
    }

    /// OR of every declared value.
    #[inline]
    pub fn known_bits(&self) -> u64 {
        self.known_bits
    }

    /// Number of declared flags.
    #[inline]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Returns true if no flags are declared.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Flag names in table order.
    pub fn symbols(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.flags.keys().map(String::as_str)
    }

    /// `(name, value)` pairs in table order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, u64)> + '_ {
        self.flags.iter().map(|(name, &value)| (name.as_str(), value))
    }

    /// The name to value table, as declared.
    #[inline]
    pub fn symbol_map(&self) -> &IndexMap<String, u64> {
        &self.flags
    }

    /// Owned copy of [`symbol_map`](Self::symbol_map).
    pub fn to_map(&self) -> IndexMap<String, u64> {
        self.flags.clone()
    }

    /// Returns true if `name` is declared.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    /// Value declared for `name`.
    #[inline]
    pub fn value_of(&self, name: &str) -> Option<u64> {
        self.flags.get(name).copied()
    }

    /// Name whose value is exactly `value`.
    ///
    /// Does not split combined values; see [`decode`](Self::decode).
    pub fn name_of(&self, value: u64) -> Option<&str> {
        let &index = self.bit_to_name.get(&value)?;
        self.flags.get_index(index).map(|(name, _)| name.as_str())
    }

    /// Exact-match lookup by name or by value.
    ///
    /// ```
    /// use nexus_mask::{FlagMask, Lookup};
    ///
    /// let mask = FlagMask::new([("foo", 0x1), ("bar", 0x2)]);
    /// assert_eq!(mask.lookup("bar"), Some(Lookup::Value(0x2)));
    /// assert_eq!(mask.lookup(0x2), Some(Lookup::Name("bar")));
    /// assert_eq!(mask.lookup(0x3), None);
    /// assert_eq!(mask.lookup(-1), None);
    /// ```
    pub fn lookup<'k>(&self, key: impl Into<Key<'k>>) -> Option<Lookup<'_>> {
        match key.into() {
            Key::Name(name) => self.value_of(name).map(Lookup::Value),
            Key::Value(value) => u64::try_from(value)
                .ok()
                .and_then(|value| self.name_of(value))
                .map(Lookup::Name),
        }
    }

    /// Packs `input` into a native value.
    ///
    /// Named input ORs the values of every set, declared flag; unknown names
    /// are skipped. Raw input is coerced through [`ToInt`] and masked with
    /// [`known_bits`](Self::known_bits).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidEncodeInput`] if a raw value has no integer form.
    pub fn encode<'a>(
        &self,
        input: impl Into<EncodeInput<'a>>,
    ) -> Result<u64, InvalidEncodeInput> {
        match input.into() {
            EncodeInput::Named(pairs) => Ok(self.encode_flags(pairs)),
            EncodeInput::Raw(value) => self.encode_raw(value),
        }
    }

    /// Packs `(name, set)` pairs. Unknown names are skipped.
    pub fn encode_flags<I, K, B>(&self, pairs: I) -> u64
    where
        I: IntoIterator<Item = (K, B)>,
        K: AsRef<str>,
        B: Borrow<bool>,
    {
        pairs
            .into_iter()
            .filter(|(_, set)| *Borrow::<bool>::borrow(set))
            .filter_map(|(name, _)| self.value_of(name.as_ref()))
            .fold(0, |acc, value| acc | value)
    }

    /// Coerces `value` to an integer and keeps only the known bits.
    ///
    /// Negative integers act as infinite two's complement, so `-1` yields
    /// every known bit.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidEncodeInput`] if `value` has no integer form.
    pub fn encode_raw<V: ToInt + ?Sized>(&self, value: &V) -> Result<u64, InvalidEncodeInput> {
        let int = value.to_int().ok_or_else(|| InvalidEncodeInput {
            input: format!("{value:?}"),
        })?;
        Ok((int & i128::from(self.known_bits)) as u64)
    }

    /// Unpacks a native value into one boolean per declared flag.
    ///
    /// A flag is set when every bit of its value is present, so a combination
    /// flag needs all of its constituent bits. Unknown bits are ignored. A
    /// flag declared as `0` is always set.
    pub fn decode(&self, native: u64) -> Decoded<'_> {
        Decoded::new(
            self.flags
                .iter()
                .map(|(name, &value)| (name.as_str(), native & value == value))
                .collect(),
        )
    }

    /// Coerces `value` through [`ToInt`], then [`decode`](Self::decode)s the
    /// low 64 bits. Returns `None` if `value` has no integer form.
    pub fn decode_raw<V: ToInt + ?Sized>(&self, value: &V) -> Option<Decoded<'_>> {
        value.to_int().map(|int| self.decode(int as u64))
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for FlagMask {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Key for [`FlagMask::lookup`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key<'a> {
    /// Look up a value by flag name.
    Name(&'a str),
    /// Look up a flag name by exact value.
    Value(i128),
}

impl<'a> From<&'a str> for Key<'a> {
    #[inline]
    fn from(name: &'a str) -> Self {
        Key::Name(name)
    }
}

impl<'a> From<&'a String> for Key<'a> {
    #[inline]
    fn from(name: &'a String) -> Self {
        Key::Name(name)
    }
}

macro_rules! impl_key_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Key<'_> {
                #[inline]
                fn from(value: $ty) -> Self {
                    Key::Value(value as i128)
                }
            }
        )*
    };
}

impl_key_from_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, i128, isize);

/// Result of [`FlagMask::lookup`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup<'m> {
    /// Value of the named flag.
    Value(u64),
    /// Name of the flag with the given value.
    Name(&'m str),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask() -> FlagMask {
        FlagMask::new([("foo", 0x1), ("bar", 0x2), ("baz", 0x4)])
    }

    #[test]
    fn known_bits_is_or_of_values() {
        assert_eq!(mask().known_bits(), 0x7);
        assert_eq!(FlagMask::new([("a", 0x3), ("b", 0x10)]).known_bits(), 0x13);
    }

    #[test]
    fn inverse_keeps_last_name() {
        let mask = FlagMask::new([("first", 0x1), ("second", 0x1), ("other", 0x2)]);
        assert_eq!(mask.bit_to_name.len(), 2);
        assert_eq!(mask.name_of(0x1), Some("second"));
        assert_eq!(mask.name_of(0x2), Some("other"));
    }

    #[test]
    fn repeated_name_keeps_position_takes_last_value() {
        let mask = FlagMask::new([("a", 0x1), ("b", 0x2), ("a", 0x4)]);
        assert_eq!(mask.symbols().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(mask.value_of("a"), Some(0x4));
        assert_eq!(mask.name_of(0x4), Some("a"));
    }

    #[test]
    fn empty_mask() {
        let mask = FlagMask::new(Vec::<(&str, u64)>::new());
        assert!(mask.is_empty());
        assert_eq!(mask.known_bits(), 0);
        assert_eq!(mask.encode_raw(&u64::MAX), Ok(0));
        assert!(mask.decode(u64::MAX).is_empty());
    }

    #[test]
    fn encode_dispatches_on_input() {
        let mask = mask();
        assert_eq!(mask.encode(&[("foo", true), ("baz", true)]), Ok(0x5));
        assert_eq!(mask.encode(&0xFFu8), Ok(0x7));
        assert_eq!(
            mask.encode(EncodeInput::raw(&None::<u32>)),
            Err(InvalidEncodeInput {
                input: "None".into()
            })
        );
    }

    #[test]
    fn from_iterator_uses_default_native() {
        let mask: FlagMask = [("x", 0x1u64)].into_iter().collect();
        assert_eq!(mask.native_type(), NativeType::UINT);
        assert_eq!(mask.value_of("x"), Some(0x1));
    }
}
