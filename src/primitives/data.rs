//! `BuilderData`: the tagged union used uniformly for datums and redeemers.
//!
//! The three content kinds mirror the three ways a caller might already
//! have their Plutus data on hand: a typed in-memory value (`Mesh`), a raw
//! JSON document in Plutus "detailed schema" form (`JSON`), or an opaque
//! pre-encoded CBOR hex string (`CBOR`) passed straight through to the
//! codec.

use num_bigint::BigInt;
use serde_json::Value as Json;

use crate::error::TxBuilderError;

/// A structured Plutus-Data value, canonically serializable to PlutusData
/// CBOR. Named `PlutusData` rather than reusing a ledger-library type
/// because this representation is the builder's own in-memory shape, built
/// before any CBOR encoding happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlutusData {
    Constr(u64, Vec<PlutusData>),
    Map(Vec<(PlutusData, PlutusData)>),
    List(Vec<PlutusData>),
    Integer(BigInt),
    Bytes(Vec<u8>),
}

/// One of the three encodings a datum or redeemer payload may arrive in.
#[derive(Debug, Clone, PartialEq)]
pub enum BuilderData {
    /// A typed Plutus-Data value constructed in memory.
    Mesh(PlutusData),
    /// Raw JSON in "detailed schema" form. Big integers are preserved as
    /// digit strings rather than rounded through `f64` — see
    /// [`BuilderData::json`].
    Json(Json),
    /// Opaque CBOR, already hex-encoded by the caller.
    Cbor(String),
}

impl BuilderData {
    pub fn mesh(data: PlutusData) -> Self {
        BuilderData::Mesh(data)
    }

    /// Parses `raw` with `serde_json`'s `arbitrary_precision` number mode
    /// enabled crate-wide, so a literal like `18446744073709551616` survives
    /// intact instead of being coerced into a lossy `f64`.
    pub fn json(raw: &str) -> Result<Self, TxBuilderError> {
        let value: Json =
            serde_json::from_str(raw).map_err(|e| TxBuilderError::MalformedJson(e.to_string()))?;
        Ok(BuilderData::Json(value))
    }

    /// Validates that `hex_str` decodes to exactly one well-formed CBOR data
    /// item — via `minicbor::Decoder::skip`, not a typed decode, since the
    /// builder never needs to look inside caller-supplied CBOR, only pass it
    /// through to the codec intact.
    pub fn cbor_hex(hex_str: impl Into<String>) -> Result<Self, TxBuilderError> {
        let hex_str = hex_str.into();
        let bytes = hex::decode(&hex_str).map_err(|e| TxBuilderError::MalformedCbor(e.to_string()))?;

        let mut decoder = minicbor::Decoder::new(&bytes);
        decoder.skip().map_err(|e| TxBuilderError::MalformedCbor(e.to_string()))?;
        if decoder.position() != bytes.len() {
            return Err(TxBuilderError::MalformedCbor(
                "trailing bytes after a single top-level CBOR item".to_string(),
            ));
        }

        Ok(BuilderData::Cbor(hex_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_preserves_big_integers() {
        let data = BuilderData::json(r#"{"amount": 18446744073709551616}"#).unwrap();
        match data {
            BuilderData::Json(Json::Object(map)) => {
                assert_eq!(
                    map.get("amount").unwrap().to_string(),
                    "18446744073709551616"
                );
            }
            _ => panic!("expected a json object"),
        }
    }

    #[test]
    fn cbor_rejects_malformed_hex() {
        assert!(BuilderData::cbor_hex("not-hex").is_err());
    }

    #[test]
    fn cbor_accepts_valid_hex() {
        let data = BuilderData::cbor_hex("d8799f01ff").unwrap();
        assert!(matches!(data, BuilderData::Cbor(_)));
    }

    #[test]
    fn cbor_rejects_trailing_bytes_after_one_item() {
        // A single well-formed uint (`01`) followed by a stray extra byte.
        assert!(BuilderData::cbor_hex("0100").is_err());
    }
}
