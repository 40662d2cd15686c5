//! Construction tracing.
//!
//! Compiled behind the `tracing` feature; the functions are inline no-ops
//! otherwise. Conversions never trace.

#[cfg(feature = "tracing")]
const MASK_TARGET: &str = "nexus_mask";

/// Traces a finished flag table.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_table_built(flags: usize, distinct_values: usize, known_bits: u64) {
    tracing::trace!(
        target: MASK_TARGET,
        flags = flags,
        distinct_values = distinct_values,
        known_bits = format_args!("{known_bits:#x}"),
        "flag mask built"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_table_built(_flags: usize, _distinct_values: usize, _known_bits: u64) {}

/// Traces two names sharing one value. Only `name` stays reachable by value.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_value_collision(value: u64, replaced: &str, name: &str) {
    tracing::debug!(
        target: MASK_TARGET,
        value = format_args!("{value:#x}"),
        replaced = %replaced,
        name = %name,
        "flag value collision, lookup by value resolves to the later name"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_value_collision(_value: u64, _replaced: &str, _name: &str) {}
