//! Error taxonomy for the transaction builder.
//!
//! Misuse (operating on a channel in the wrong state) panics immediately via
//! [`misuse`] rather than returning a `Result` — the corpus this crate is
//! modeled on treats similar programmer-error conditions (corrupted
//! transaction bytes mid-signing, a malformed key) the same way. Everything
//! recoverable at `finalize` time is a variant of [`TxBuilderError`].

/// Panics with a message naming the operation and the offending channel state.
macro_rules! misuse {
    ($op:expr, $state:expr) => {
        panic!("misuse: `{}` is not valid on a pending item in state `{}`", $op, $state)
    };
    ($msg:expr) => {
        panic!("misuse: {}", $msg)
    };
}

pub(crate) use misuse;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TxBuilderError {
    #[error("script input {0} is missing one of scriptSource/datumSource/redeemer")]
    IncompleteScriptInput(String),

    #[error("plutus mint for policy {0} is missing scriptSource or redeemer")]
    IncompleteMint(String),

    #[error("script withdrawal for {0} is missing scriptSource or redeemer")]
    IncompleteWithdrawal(String),

    #[error("script certificate is missing a redeemer")]
    IncompleteCertificate,

    #[error("utxo selection could not cover required assets: {0}")]
    Selection(String),

    #[error("malformed cbor hex: {0}")]
    MalformedCbor(String),

    #[error("malformed json supplied as BuilderData: {0}")]
    MalformedJson(String),

    #[error("asset name must be 32 bytes or less")]
    AssetNameTooLong,

    #[error("invalid reward address: {0}")]
    InvalidRewardAddress(String),
}
