//! Decoded flag sets.

use indexmap::IndexMap;
use indexmap::map::IntoIter;

/// Per-flag result of [`FlagMask::decode`](crate::FlagMask::decode).
///
/// Holds exactly one entry per declared flag, in table order. Borrows the
/// names from the mask it came from. Comparisons are order-sensitive.
#[derive(Clone, Debug)]
pub struct Decoded<'m> {
    flags: IndexMap<&'m str, bool>,
}

impl<'m> Decoded<'m> {
    pub(crate) fn new(flags: IndexMap<&'m str, bool>) -> Self {
        Self { flags }
    }

    /// Whether `name` is set, or `None` if the mask has no such flag.
    #[inline]
    pub fn get(&self, name: &str) -> Option<bool> {
        self.flags.get(name).copied()
    }

    /// Returns true if `name` is declared and set.
    #[inline]
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).unwrap_or(false)
    }

    /// Every flag with its state, in table order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&'m str, bool)> + '_ {
        self.flags.iter().map(|(&name, &set)| (name, set))
    }

    /// Names of set flags, in table order.
    pub fn set_names(&self) -> impl Iterator<Item = &'m str> + '_ {
        self.iter().filter_map(|(name, set)| set.then_some(name))
    }

    /// Number of flags (set or not).
    #[inline]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Returns true if the mask declares no flags.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Unwraps into the underlying ordered map.
    #[inline]
    pub fn into_map(self) -> IndexMap<&'m str, bool> {
        self.flags
    }
}

impl<'m> IntoIterator for Decoded<'m> {
    type Item = (&'m str, bool);
    type IntoIter = IntoIter<&'m str, bool>;

    fn into_iter(self) -> Self::IntoIter {
        self.flags.into_iter()
    }
}

impl PartialEq for Decoded<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.flags.iter().eq(other.flags.iter())
    }
}

impl Eq for Decoded<'_> {}

impl PartialEq<IndexMap<&str, bool>> for Decoded<'_> {
    fn eq(&self, other: &IndexMap<&str, bool>) -> bool {
        self.flags.len() == other.len()
            && self
                .flags
                .iter()
                .zip(other)
                .all(|((name, set), (other_name, other_set))| {
                    name == other_name && set == other_set
                })
    }
}

impl<const N: usize> PartialEq<[(&str, bool); N]> for Decoded<'_> {
    fn eq(&self, other: &[(&str, bool); N]) -> bool {
        self.flags.len() == N
            && self
                .flags
                .iter()
                .zip(other)
                .all(|((name, set), (other_name, other_set))| {
                    name == other_name && set == other_set
                })
    }
}
