//! Candidate UTxOs as supplied by an external `Fetcher`/`Wallet` and
//! consumed by UTxO Selection.

use super::data::BuilderData;
use super::value::Assets;
use super::{Address, PlutusVersion, TxHash};

/// Identity of an unspent output: `(txHash, outputIndex)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TxIn {
    pub tx_hash: TxHash,
    pub index: u64,
}

impl TxIn {
    pub fn new(tx_hash: TxHash, index: u64) -> Self {
        Self { tx_hash, index }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UtxoDatum {
    Hash(super::DatumHash),
    Inline(BuilderData),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceScript {
    pub version: PlutusVersion,
    pub cbor_hex: String,
}

/// A UTxO as it's known before selection: its identity plus the output it
/// points at. Identity is `(txHash, outputIndex)` only — two `Utxo` values
/// with the same `input` are the same UTxO regardless of output contents.
#[derive(Debug, Clone, PartialEq)]
pub struct Utxo {
    pub input: TxIn,
    pub address: Address,
    pub amount: Assets,
    pub datum: Option<UtxoDatum>,
    pub reference_script: Option<ReferenceScript>,
}

impl Utxo {
    pub fn new(input: TxIn, address: Address, amount: Assets) -> Self {
        Self { input, address, amount, datum: None, reference_script: None }
    }

    pub fn has_script(&self) -> bool {
        self.reference_script.is_some() || self.address.has_script()
    }
}

impl PartialEq<TxIn> for Utxo {
    fn eq(&self, other: &TxIn) -> bool {
        self.input == *other
    }
}
