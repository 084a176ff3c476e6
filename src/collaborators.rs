//! External collaborator traits: the only place this crate touches `async`.
//! The Fluent Builder Core itself stays synchronous; a caller wires in
//! chain access, evaluation, and submission by implementing these against
//! whatever client they already have (an Ogmios/Blockfrost/node connection),
//! keeping this crate ignorant of any particular backend.

use crate::primitives::utxo::Utxo;
use crate::reconcile::Action;

/// Looks up unspent outputs at an address. Used to populate a pool for
/// UTxO Selection when the caller doesn't already have one on hand.
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    async fn utxos_at(&self, address: &str) -> anyhow::Result<Vec<Utxo>>;
}

/// Submits a finished, signed transaction to the network.
#[allow(async_fn_in_trait)]
pub trait Submitter {
    async fn submit(&self, tx_bytes: &[u8]) -> anyhow::Result<String>;
}

/// Runs a transaction through a Plutus evaluator (e.g. an Ogmios
/// `evaluateTransaction` call) to obtain real execution-unit budgets for
/// the Evaluation Reconciler to fold back onto pending redeemers.
#[allow(async_fn_in_trait)]
pub trait Evaluator {
    async fn evaluate(&self, tx_bytes: &[u8]) -> anyhow::Result<Vec<Action>>;
}

/// A synchronous source of the caller's own spendable state: no network
/// call is implied, so this trait is not `async` unlike its siblings.
pub trait Wallet {
    fn change_address(&self) -> &str;
    fn available_utxos(&self) -> &[Utxo];
}
