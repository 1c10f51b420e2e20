//! `serde_with` adapters for base-unit amounts.

use {
    primitive_types::U256,
    serde::{Deserialize, Deserializer, Serializer, de},
    serde_with::{DeserializeAs, SerializeAs},
    std::borrow::Cow,
};

/// Serializes a `U256` as a decimal string, the format JSON consumers expect
/// for values that overflow a double.
pub struct DecimalU256;

impl SerializeAs<U256> for DecimalU256 {
    fn serialize_as<S>(source: &U256, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&source.to_string())
    }
}

impl<'de> DeserializeAs<'de, U256> for DecimalU256 {
    fn deserialize_as<D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Cow::<str>::deserialize(deserializer)?;
        U256::from_dec_str(&s)
            .map_err(|err| de::Error::custom(format!("failed to parse {s:?} as U256: {err}")))
    }
}
