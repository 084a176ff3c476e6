//! Protocol parameters and defaults, overridable per §6's "external
//! constant, caller may partially override" contract. No CLI/env surface:
//! this crate has none in scope, so unlike the corpus's `clap`-derived
//! `Config`, there's nothing here but plain structs.

use serde::{Deserialize, Serialize};

/// The handful of protocol parameters this crate's components actually
/// consult (min-UTxO deposit coefficients, collateral sizing). A caller
/// embedding this crate against live chain state is expected to populate
/// this from their own `Fetcher`; the crate ships only conservative
/// mainnet-era defaults. `Serialize`/`Deserialize` let a caller load this
/// straight out of the same JSON a chain query would return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolParams {
    pub min_utxo_deposit_coefficient: u64,
    pub min_utxo_deposit_constant: u64,
    pub collateral_percentage: f64,
    pub max_collateral_inputs: usize,
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            min_utxo_deposit_coefficient: 4310,
            min_utxo_deposit_constant: 0,
            collateral_percentage: 150.0,
            // NOTE: current Cardano protocol limits this to 3.
            max_collateral_inputs: 3,
        }
    }
}

impl ProtocolParams {
    /// Applies a caller-supplied partial override on top of the defaults,
    /// matching `protocolParams(partialOverride)` in the global operations
    /// vocabulary.
    pub fn with_override(mut self, patch: ProtocolParamsPatch) -> Self {
        if let Some(v) = patch.min_utxo_deposit_coefficient {
            self.min_utxo_deposit_coefficient = v;
        }
        if let Some(v) = patch.min_utxo_deposit_constant {
            self.min_utxo_deposit_constant = v;
        }
        if let Some(v) = patch.collateral_percentage {
            self.collateral_percentage = v;
        }
        if let Some(v) = patch.max_collateral_inputs {
            self.max_collateral_inputs = v;
        }
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolParamsPatch {
    pub min_utxo_deposit_coefficient: Option<u64>,
    pub min_utxo_deposit_constant: Option<u64>,
    pub collateral_percentage: Option<f64>,
    pub max_collateral_inputs: Option<usize>,
}

/// Safety multiplier applied by the Evaluation Reconciler to a matched
/// evaluation result. 1.1 is a 10% margin over the advisory off-chain
/// estimate.
pub const DEFAULT_EX_UNITS_MULTIPLIER: f64 = 1.1;
