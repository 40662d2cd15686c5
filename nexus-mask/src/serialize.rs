//! Serde support, for keeping flag tables in configuration files.
//!
//! A [`FlagMask`] serializes as
//!
//! ```json
//! { "native": "uint16", "flags": { "read": 1, "write": 2 } }
//! ```
//!
//! `native` is optional when deserializing and defaults to `uint`.
//! Table order is the order the deserializer yields map keys in. Formats that
//! sort keys, such as `serde_json::Value` without its `preserve_order`
//! feature, lose the declared order.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::mask::FlagMask;
use crate::native::NativeType;

impl Serialize for NativeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NativeType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(de::Error::custom)
    }
}

#[derive(Serialize)]
struct FlagMaskRepr<'a> {
    native: NativeType,
    flags: &'a IndexMap<String, u64>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct FlagMaskDef {
    #[serde(default)]
    native: NativeType,
    flags: IndexMap<String, u64>,
}

impl Serialize for FlagMask {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FlagMaskRepr {
            native: self.native_type(),
            flags: self.symbol_map(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FlagMask {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let def = FlagMaskDef::deserialize(deserializer)?;
        Ok(FlagMask::with_native(def.flags, def.native))
    }
}
