//! Shared scalar types threaded through the builder, selection, and
//! reconciliation modules.

pub mod data;
pub mod utxo;
pub mod value;

pub use pallas::crypto::hash::Hash;
pub use pallas::ledger::addresses::Address;

pub type TxHash = Hash<32>;
pub type PubKeyHash = Hash<28>;
pub type ScriptHash = Hash<28>;
pub type PolicyId = ScriptHash;
pub type DatumHash = Hash<32>;

/// Raw bytes, used for CBOR-encoded scripts and asset names where a fixed
/// hash width doesn't apply.
pub type Bytes = Vec<u8>;
pub type AssetName = Bytes;

/// A Plutus language version. Native scripts carry no version at all, so
/// this type only appears where the source distinguishes `V1`/`V2`/`V3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlutusVersion {
    V1,
    V2,
    V3,
}

impl Default for PlutusVersion {
    /// Reference-script setters that weren't preceded by a
    /// `spending_plutus_script_v*`/`mint_plutus_script_v*`/
    /// `withdrawal_plutus_script_v*` call fall back to V2.
    fn default() -> Self {
        PlutusVersion::V2
    }
}
