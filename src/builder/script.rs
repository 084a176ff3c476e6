//! Tagged-union item shapes flushed onto `BuilderBody`'s channels: inputs,
//! mints, withdrawals, and certificates. Each channel's three variants
//! (plain/simple-script/plutus-script) are modeled as a native `enum` rather
//! than a discriminated `type` field, so most misuse is unreachable by
//! construction and only checked at the handful of channel boundaries where
//! the open variant is genuinely ambiguous (see `builder::input`).

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::primitives::data::BuilderData;
use crate::primitives::utxo::TxIn;
use crate::primitives::{Address, PlutusVersion, PolicyId, ScriptHash};

/// Where a channel item's script comes from: inlined by the caller, or
/// referenced from an existing on-chain UTxO.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptSource {
    /// Script bytes supplied directly, hex-encoded. `version` is `None` for
    /// native scripts, `Some` for Plutus.
    Provided { cbor_hex: String, version: Option<PlutusVersion> },
    /// Script carried by a reference input instead of re-uploaded.
    /// `script_hash` should be supplied by the caller when known; left
    /// unset only pre-finalize.
    Inline { tx_in: TxIn, script_hash: Option<ScriptHash>, version: Option<PlutusVersion> },
}

/// Where a script input's datum comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum DatumSource {
    /// Datum bytes revealed inline in the witness set.
    Provided(BuilderData),
    /// Datum is attached inline to the spent output itself; nothing to
    /// reveal separately.
    Inline,
}

/// Deserializable so a `reconcile::Action` decoded from an evaluator's JSON
/// response carries its budget straight into this shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExUnits {
    pub mem: u64,
    pub steps: u64,
}

impl ExUnits {
    /// Large placeholder budget used until the Evaluation Reconciler
    /// overwrites it with a real evaluation result.
    pub const DEFAULT: ExUnits = ExUnits { mem: 14_000_000, steps: 10_000_000_000 };
}

impl Default for ExUnits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Redeemer {
    pub data: BuilderData,
    pub ex_units: ExUnits,
}

impl Redeemer {
    pub fn new(data: BuilderData, ex_units: Option<ExUnits>) -> Self {
        Self { data, ex_units: ex_units.unwrap_or_default() }
    }
}

/// Fields shared by every input variant.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRef {
    pub tx_in: TxIn,
    /// Declared value at this input, as supplied by the caller — the
    /// builder does not query chain state to fill this in.
    pub amount: Option<crate::primitives::value::Assets>,
    pub address: Option<Address>,
}

/// Channel: Input. `PubKey` carries no script; `SimpleScript` and `Script`
/// add the fields §3 requires before flush.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    PubKey(InputRef),
    SimpleScript { input: InputRef, script_source: Option<ScriptSource> },
    Script {
        input: InputRef,
        /// Plutus version remembered from the preceding
        /// `spending_plutus_script_v{1,2,3}` call, consulted by
        /// `spending_tx_in_reference`'s default-to-V2 fallback.
        version: Option<PlutusVersion>,
        script_source: Option<ScriptSource>,
        datum_source: Option<DatumSource>,
        redeemer: Option<Redeemer>,
    },
}

impl Input {
    pub fn tx_in(&self) -> TxIn {
        match self {
            Input::PubKey(i) => i.tx_in,
            Input::SimpleScript { input, .. } => input.tx_in,
            Input::Script { input, .. } => input.tx_in,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Input::PubKey(_) => "PubKey",
            Input::SimpleScript { .. } => "SimpleScript",
            Input::Script { .. } => "Script",
        }
    }

    /// `true` once every field required by §3's invariant for `Script`
    /// inputs (`scriptSource`, `datumSource`, `redeemer`) is populated.
    /// Always `true` for non-`Script` variants.
    pub fn is_complete(&self) -> bool {
        match self {
            Input::PubKey(_) | Input::SimpleScript { .. } => true,
            Input::Script { script_source, datum_source, redeemer, .. } => {
                script_source.is_some() && datum_source.is_some() && redeemer.is_some()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MintType {
    Native,
    Plutus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MintItem {
    pub policy_id: PolicyId,
    pub asset_name: Vec<u8>,
    /// Signed: a positive amount mints, negative burns.
    pub amount: BigInt,
    pub mint_type: MintType,
    /// Remembered from `mint_plutus_script_v{1,2,3}`; consulted by
    /// `mint_tx_in_reference`'s default-to-V2 fallback. `None` for `Native`.
    pub version: Option<PlutusVersion>,
    pub script_source: Option<ScriptSource>,
    pub redeemer: Option<Redeemer>,
}

impl MintItem {
    pub fn is_complete(&self) -> bool {
        match self.mint_type {
            MintType::Native => self.script_source.is_some(),
            MintType::Plutus => self.script_source.is_some() && self.redeemer.is_some(),
        }
    }
}

/// Channel: Withdrawal. Each variant carries `(rewardAddress, coin)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Withdrawal {
    PubKey { reward_address: String, coin: u64 },
    SimpleScript { reward_address: String, coin: u64, script_source: Option<ScriptSource> },
    Script {
        reward_address: String,
        coin: u64,
        version: Option<PlutusVersion>,
        script_source: Option<ScriptSource>,
        redeemer: Option<Redeemer>,
    },
}

impl Withdrawal {
    pub fn is_complete(&self) -> bool {
        match self {
            Withdrawal::PubKey { .. } => true,
            Withdrawal::SimpleScript { script_source, .. } => script_source.is_some(),
            Withdrawal::Script { script_source, redeemer, .. } => {
                script_source.is_some() && redeemer.is_some()
            }
        }
    }
}

/// A stake/pool lifecycle operation, independent of whether it's witnessed
/// by a key or a script.
#[derive(Debug, Clone, PartialEq)]
pub enum CertType {
    RegisterPool { pool_id: String, params_cbor_hex: String },
    RetirePool { pool_id: String, epoch: u64 },
    RegisterStake { address: String },
    DeregisterStake { address: String },
    DelegateStake { address: String, pool_id: String },
}

/// Channel: Certificate. Pushed directly onto the body; `certificateScript`/
/// `certificateTxInReference`/`certificateRedeemerValue` pop the last entry,
/// mutate it, and re-push (see `builder::certificate`).
#[derive(Debug, Clone, PartialEq)]
pub enum Certificate {
    Basic(CertType),
    SimpleScript { cert_type: CertType, script_source: Option<ScriptSource> },
    Script { cert_type: CertType, script_source: Option<ScriptSource>, redeemer: Option<Redeemer> },
}

impl Certificate {
    pub fn is_complete(&self) -> bool {
        match self {
            Certificate::Basic(_) | Certificate::SimpleScript { .. } => true,
            Certificate::Script { redeemer, .. } => redeemer.is_some(),
        }
    }
}
