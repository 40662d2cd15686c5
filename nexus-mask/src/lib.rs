//! Named flag tables packed into native integers.
//!
//! `nexus-mask` converts between symbolic option sets and the OR-combined
//! integer constants native APIs take - open flags, socket options, register
//! bits. A [`FlagMask`] holds a `name -> value` table plus the [`NativeType`]
//! the packed value crosses the foreign boundary as.
//!
//! # Example
//!
//! ```
//! use nexus_mask::{FlagMask, NativeType};
//!
//! // Define table
//! let mask = FlagMask::with_native(
//!     [("read", 0x1), ("write", 0x2), ("read_write", 0x3), ("create", 0x40)],
//!     NativeType::U16,
//! );
//!
//! // Pack names; unknown names are skipped
//! let raw = mask.encode_flags([("read", true), ("create", true), ("bogus", true)]);
//! assert_eq!(raw, 0x41);
//!
//! // Pack a raw integer; unknown bits are dropped
//! assert_eq!(mask.encode(&0x8043u32), Ok(0x43));
//!
//! // Unpack; combination flags need all of their bits
//! let flags = mask.decode(0x43);
//! assert_eq!(
//!     flags,
//!     [("read", true), ("write", true), ("read_write", true), ("create", true)]
//! );
//! assert!(!mask.decode(0x1).is_set("read_write"));
//! ```
//!
//! # Features
//!
//! - `derive` (default): `#[derive(FlagTable)]` for fieldless enums.
//! - `serde`: (de)serialize [`FlagMask`] and [`NativeType`].
//! - `tracing`: debug events while building tables.

#![warn(missing_docs)]

mod decoded;
mod error;
mod input;
mod mask;
mod native;
#[cfg(feature = "serde")]
mod serialize;
mod table;
mod trace;

pub use decoded::Decoded;
pub use error::{InvalidEncodeInput, ParseNativeTypeError};
pub use input::{EncodeInput, ToInt};
pub use mask::{FlagMask, Key, Lookup};
pub use native::{Native, NativeType};
pub use table::FlagTable;

#[cfg(feature = "derive")]
pub use nexus_mask_derive::FlagTable;
