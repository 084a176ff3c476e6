//! Fluent Builder Core: a consuming-`self` method chain that threads
//! pending channel items (input, output, mint, withdrawal, collateral) into
//! `BuilderBody`, plus the certificate channel's push-then-mutate-last
//! mechanic and the global operations (`change_address`, validity range,
//! metadata, selection config, `finalize`).
//!
//! The single-slot-per-channel design lets a caller interleave "open then
//! decorate" calls without an explicit commit step: an item is flushed
//! exactly when a new one opens on the same channel, or when `finalize`
//! drains everything that's still pending.

pub mod output;
pub mod script;

use std::collections::BTreeMap;

use tracing::instrument;

use crate::config::ProtocolParams;
use crate::error::{misuse, TxBuilderError};
use crate::primitives::data::BuilderData;
use crate::primitives::utxo::{TxIn, Utxo};
use crate::primitives::value::Assets;
use crate::primitives::{Address, PlutusVersion, PolicyId, PubKeyHash, ScriptHash};
use crate::selection::SelectionConfig;

use output::Output;
use script::{
    CertType, Certificate, ExUnits, Input, InputRef, MintItem, MintType, Redeemer, ScriptSource,
    Withdrawal,
};

/// A reward address must be bech32(m)-encoded under a `stake`/`stake_test`
/// human-readable part; anything else can't be a withdrawal target.
fn validate_reward_address(address: &str) -> Result<(), TxBuilderError> {
    let (hrp, _data) =
        bech32::decode(address).map_err(|e| TxBuilderError::InvalidRewardAddress(e.to_string()))?;
    if !hrp.as_str().starts_with("stake") {
        return Err(TxBuilderError::InvalidRewardAddress(format!(
            "expected a stake-prefixed bech32 human-readable part, got `{}`",
            hrp.as_str()
        )));
    }
    Ok(())
}

/// The aggregate mutable descriptor produced by the Fluent Builder Core.
/// Starts empty; only mutated through `TxBuilder`'s channel methods and the
/// Evaluation Reconciler.
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderBody {
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
    pub mints: Vec<MintItem>,
    pub withdrawals: Vec<Withdrawal>,
    pub certificates: Vec<Certificate>,
    pub reference_inputs: Vec<TxIn>,
    pub collaterals: Vec<InputRef>,
    pub required_signatures: Vec<PubKeyHash>,
    pub signing_keys: Vec<String>,
    pub metadata: BTreeMap<u64, BuilderData>,
    pub change_address: Option<Address>,
    pub invalid_before: Option<u64>,
    pub invalid_hereafter: Option<u64>,
    pub extra_inputs: Vec<Utxo>,
    pub selection_config: SelectionConfig,
}

impl Default for BuilderBody {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            outputs: Vec::new(),
            mints: Vec::new(),
            withdrawals: Vec::new(),
            certificates: Vec::new(),
            reference_inputs: Vec::new(),
            collaterals: Vec::new(),
            required_signatures: Vec::new(),
            signing_keys: Vec::new(),
            metadata: BTreeMap::new(),
            change_address: None,
            invalid_before: None,
            invalid_hereafter: None,
            extra_inputs: Vec::new(),
            selection_config: SelectionConfig::default(),
        }
    }
}

/// The fluent builder itself: `BuilderBody` plus the five single-entry
/// pending slots and the script-mode flags that decide what the *next*
/// channel-opening call produces.
#[derive(Debug, Clone, PartialEq)]
pub struct TxBuilder {
    pub body: BuilderBody,
    pub protocol_params: ProtocolParams,

    pending_input: Option<Input>,
    pending_output: Option<Output>,
    pending_mint: Option<MintItem>,
    pending_withdrawal: Option<Withdrawal>,
    pending_collateral: Option<InputRef>,

    input_script_mode: Option<PlutusVersion>,
    mint_script_mode: Option<PlutusVersion>,
    withdrawal_script_mode: Option<PlutusVersion>,
}

impl Default for TxBuilder {
    fn default() -> Self {
        Self {
            body: BuilderBody::default(),
            protocol_params: ProtocolParams::default(),
            pending_input: None,
            pending_output: None,
            pending_mint: None,
            pending_withdrawal: None,
            pending_collateral: None,
            input_script_mode: None,
            mint_script_mode: None,
            withdrawal_script_mode: None,
        }
    }
}

impl TxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------
    // Channel: Input
    // ---------------------------------------------------------------

    pub fn spending_plutus_script_v1(mut self) -> Self {
        self.input_script_mode = Some(PlutusVersion::V1);
        self
    }

    pub fn spending_plutus_script_v2(mut self) -> Self {
        self.input_script_mode = Some(PlutusVersion::V2);
        self
    }

    pub fn spending_plutus_script_v3(mut self) -> Self {
        self.input_script_mode = Some(PlutusVersion::V3);
        self
    }

    fn flush_input(&mut self) {
        if let Some(input) = self.pending_input.take() {
            self.body.inputs.push(input);
        }
    }

    #[instrument(skip(self, amount, address))]
    pub fn tx_in(
        mut self,
        tx_hash: crate::primitives::TxHash,
        tx_index: u64,
        amount: Option<Assets>,
        address: Option<Address>,
    ) -> Self {
        self.flush_input();
        let input_ref = InputRef { tx_in: TxIn::new(tx_hash, tx_index), amount, address };
        self.pending_input = Some(match self.input_script_mode.take() {
            Some(version) => Input::Script {
                input: input_ref,
                version: Some(version),
                script_source: None,
                datum_source: None,
                redeemer: None,
            },
            None => Input::PubKey(input_ref),
        });
        self
    }

    /// On a `PubKey` pending input, promotes to `SimpleScript`; on `Script`,
    /// sets `scriptSource`. Errors (panics) on `SimpleScript`, which already
    /// has its script.
    pub fn tx_in_script(mut self, cbor_hex: impl Into<String>) -> Self {
        let cbor_hex = cbor_hex.into();
        self.pending_input = Some(match self.pending_input.take() {
            Some(Input::PubKey(input)) => {
                Input::SimpleScript { input, script_source: Some(ScriptSource::Provided { cbor_hex, version: None }) }
            }
            Some(Input::Script { input, version, datum_source, redeemer, .. }) => Input::Script {
                input,
                version,
                script_source: Some(ScriptSource::Provided { cbor_hex, version }),
                datum_source,
                redeemer,
            },
            Some(Input::SimpleScript { .. }) => misuse!("tx_in_script", "SimpleScript"),
            None => misuse!("tx_in_script", "no pending input"),
        });
        self
    }

    pub fn tx_in_datum_value(mut self, data: BuilderData) -> Self {
        self.pending_input = Some(match self.pending_input.take() {
            Some(Input::Script { input, version, script_source, redeemer, .. }) => Input::Script {
                input,
                version,
                script_source,
                datum_source: Some(script::DatumSource::Provided(data)),
                redeemer,
            },
            Some(other) => misuse!("tx_in_datum_value", other.kind()),
            None => misuse!("tx_in_datum_value", "no pending input"),
        });
        self
    }

    pub fn tx_in_inline_datum_present(mut self) -> Self {
        self.pending_input = Some(match self.pending_input.take() {
            Some(Input::Script { input, version, script_source, redeemer, .. }) => Input::Script {
                input,
                version,
                script_source,
                datum_source: Some(script::DatumSource::Inline),
                redeemer,
            },
            Some(other) => misuse!("tx_in_inline_datum_present", other.kind()),
            None => misuse!("tx_in_inline_datum_present", "no pending input"),
        });
        self
    }

    pub fn tx_in_redeemer_value(
        mut self,
        data: BuilderData,
        ex_units: Option<ExUnits>,
    ) -> Self {
        self.pending_input = Some(match self.pending_input.take() {
            Some(Input::Script { input, version, script_source, datum_source, .. }) => Input::Script {
                input,
                version,
                script_source,
                datum_source,
                redeemer: Some(Redeemer::new(data, ex_units)),
            },
            Some(other) => misuse!("tx_in_redeemer_value", other.kind()),
            None => misuse!("tx_in_redeemer_value", "no pending input"),
        });
        self
    }

    pub fn spending_tx_in_reference(
        mut self,
        tx_hash: crate::primitives::TxHash,
        tx_index: u64,
        script_hash: Option<ScriptHash>,
    ) -> Self {
        self.pending_input = Some(match self.pending_input.take() {
            Some(Input::Script { input, version, datum_source, redeemer, .. }) => {
                let version = version.or(Some(PlutusVersion::default()));
                Input::Script {
                    input,
                    version,
                    script_source: Some(ScriptSource::Inline {
                        tx_in: TxIn::new(tx_hash, tx_index),
                        script_hash,
                        version,
                    }),
                    datum_source,
                    redeemer,
                }
            }
            Some(other) => misuse!("spending_tx_in_reference", other.kind()),
            None => misuse!("spending_tx_in_reference", "no pending input"),
        });
        self
    }

    /// Appends directly to `referenceInputs`; does not touch the pending
    /// input slot.
    pub fn read_only_tx_in_reference(mut self, tx_hash: crate::primitives::TxHash, tx_index: u64) -> Self {
        self.body.reference_inputs.push(TxIn::new(tx_hash, tx_index));
        self
    }

    // ---------------------------------------------------------------
    // Channel: Output
    // ---------------------------------------------------------------

    fn flush_output(&mut self) {
        if let Some(output) = self.pending_output.take() {
            self.body.outputs.push(output);
        }
    }

    pub fn tx_out(mut self, address: Address, amount: Assets) -> Self {
        self.flush_output();
        self.pending_output = Some(Output::new(address, amount));
        self
    }

    /// No-op if nothing is pending, per §4.1.
    pub fn tx_out_datum_hash_value(mut self, data: BuilderData) -> Self {
        if let Some(output) = self.pending_output.take() {
            self.pending_output = Some(output.with_datum_hash(data));
        }
        self
    }

    pub fn tx_out_inline_datum_value(mut self, data: BuilderData) -> Self {
        if let Some(output) = self.pending_output.take() {
            self.pending_output = Some(output.with_inline_datum(data));
        }
        self
    }

    pub fn tx_out_reference_script(mut self, version: PlutusVersion, code_cbor_hex: String) -> Self {
        if let Some(output) = self.pending_output.take() {
            self.pending_output = Some(output.with_reference_script(version, code_cbor_hex));
        }
        self
    }

    // ---------------------------------------------------------------
    // Channel: Mint
    // ---------------------------------------------------------------

    pub fn mint_plutus_script_v1(mut self) -> Self {
        self.mint_script_mode = Some(PlutusVersion::V1);
        self
    }

    pub fn mint_plutus_script_v2(mut self) -> Self {
        self.mint_script_mode = Some(PlutusVersion::V2);
        self
    }

    pub fn mint_plutus_script_v3(mut self) -> Self {
        self.mint_script_mode = Some(PlutusVersion::V3);
        self
    }

    fn flush_mint(&mut self) {
        if let Some(mint) = self.pending_mint.take() {
            self.body.mints.push(mint);
        }
    }

    pub fn mint(
        mut self,
        amount: num_bigint::BigInt,
        policy_id: PolicyId,
        asset_name: Vec<u8>,
    ) -> Result<Self, TxBuilderError> {
        if asset_name.len() > 32 {
            return Err(TxBuilderError::AssetNameTooLong);
        }
        self.flush_mint();
        let version = self.mint_script_mode.take();
        self.pending_mint = Some(MintItem {
            policy_id,
            asset_name,
            amount,
            mint_type: if version.is_some() { MintType::Plutus } else { MintType::Native },
            version,
            script_source: None,
            redeemer: None,
        });
        Ok(self)
    }

    pub fn minting_script(mut self, cbor_hex: impl Into<String>) -> Self {
        let cbor_hex = cbor_hex.into();
        self.pending_mint = Some(match self.pending_mint.take() {
            Some(mut item) => {
                let version = if item.mint_type == MintType::Plutus { item.version } else { None };
                item.script_source = Some(ScriptSource::Provided { cbor_hex, version });
                item
            }
            None => misuse!("minting_script", "no pending mint"),
        });
        self
    }

    /// Unlike its `spending`/`withdrawal`/`certificate` siblings,
    /// `script_hash` is required here, not inferred: a minting policy's
    /// script hash *is* the policy id already on hand at the call site, so
    /// there's no reason to let it slip through blank the way a stray
    /// reference-input lookup elsewhere might.
    pub fn mint_tx_in_reference(
        mut self,
        tx_hash: crate::primitives::TxHash,
        tx_index: u64,
        script_hash: ScriptHash,
    ) -> Self {
        self.pending_mint = Some(match self.pending_mint.take() {
            Some(mut item) if item.mint_type == MintType::Plutus => {
                let version = item.version.or(Some(PlutusVersion::default()));
                item.version = version;
                item.script_source = Some(ScriptSource::Inline {
                    tx_in: TxIn::new(tx_hash, tx_index),
                    script_hash: Some(script_hash),
                    version,
                });
                item
            }
            Some(_) => misuse!("mint_tx_in_reference", "Native"),
            None => misuse!("mint_tx_in_reference", "no pending mint"),
        });
        self
    }

    pub fn mint_redeemer_value(mut self, data: BuilderData, ex_units: Option<ExUnits>) -> Self {
        self.pending_mint = Some(match self.pending_mint.take() {
            Some(mut item) if item.mint_type == MintType::Plutus => {
                item.redeemer = Some(Redeemer::new(data, ex_units));
                item
            }
            Some(_) => misuse!("mint_redeemer_value", "Native"),
            None => misuse!("mint_redeemer_value", "no pending mint"),
        });
        self
    }

    /// Alias covering the source vocabulary's `mintReferenceTxInRedeemerValue`
    /// — setting a redeemer behaves identically whether the mint's script
    /// came from a provided script or a reference input.
    pub fn mint_reference_tx_in_redeemer_value(self, data: BuilderData, ex_units: Option<ExUnits>) -> Self {
        self.mint_redeemer_value(data, ex_units)
    }

    // ---------------------------------------------------------------
    // Channel: Withdrawal
    // ---------------------------------------------------------------

    pub fn withdrawal_plutus_script_v1(mut self) -> Self {
        self.withdrawal_script_mode = Some(PlutusVersion::V1);
        self
    }

    pub fn withdrawal_plutus_script_v2(mut self) -> Self {
        self.withdrawal_script_mode = Some(PlutusVersion::V2);
        self
    }

    pub fn withdrawal_plutus_script_v3(mut self) -> Self {
        self.withdrawal_script_mode = Some(PlutusVersion::V3);
        self
    }

    fn flush_withdrawal(&mut self) {
        if let Some(withdrawal) = self.pending_withdrawal.take() {
            self.body.withdrawals.push(withdrawal);
        }
    }

    pub fn withdrawal(
        mut self,
        reward_address: impl Into<String>,
        coin: u64,
    ) -> Result<Self, TxBuilderError> {
        let reward_address = reward_address.into();
        validate_reward_address(&reward_address)?;

        self.flush_withdrawal();
        self.pending_withdrawal = Some(match self.withdrawal_script_mode.take() {
            Some(version) => Withdrawal::Script {
                reward_address,
                coin,
                version: Some(version),
                script_source: None,
                redeemer: None,
            },
            None => Withdrawal::PubKey { reward_address, coin },
        });
        Ok(self)
    }

    pub fn withdrawal_script(mut self, cbor_hex: impl Into<String>) -> Self {
        let cbor_hex = cbor_hex.into();
        self.pending_withdrawal = Some(match self.pending_withdrawal.take() {
            Some(Withdrawal::PubKey { reward_address, coin }) => Withdrawal::SimpleScript {
                reward_address,
                coin,
                script_source: Some(ScriptSource::Provided { cbor_hex, version: None }),
            },
            Some(Withdrawal::Script { reward_address, coin, version, redeemer, .. }) => {
                Withdrawal::Script {
                    reward_address,
                    coin,
                    version,
                    script_source: Some(ScriptSource::Provided { cbor_hex, version }),
                    redeemer,
                }
            }
            Some(Withdrawal::SimpleScript { .. }) => misuse!("withdrawal_script", "SimpleScript"),
            None => misuse!("withdrawal_script", "no pending withdrawal"),
        });
        self
    }

    pub fn withdrawal_tx_in_reference(
        mut self,
        tx_hash: crate::primitives::TxHash,
        tx_index: u64,
        script_hash: Option<ScriptHash>,
    ) -> Self {
        self.pending_withdrawal = Some(match self.pending_withdrawal.take() {
            Some(Withdrawal::Script { reward_address, coin, version, redeemer, .. }) => {
                let version = version.or(Some(PlutusVersion::default()));
                Withdrawal::Script {
                    reward_address,
                    coin,
                    version,
                    script_source: Some(ScriptSource::Inline {
                        tx_in: TxIn::new(tx_hash, tx_index),
                        script_hash,
                        version,
                    }),
                    redeemer,
                }
            }
            Some(_) => misuse!("withdrawal_tx_in_reference", "PubKeyWithdrawal"),
            None => misuse!("withdrawal_tx_in_reference", "no pending withdrawal"),
        });
        self
    }

    pub fn withdrawal_redeemer_value(mut self, data: BuilderData, ex_units: Option<ExUnits>) -> Self {
        self.pending_withdrawal = Some(match self.pending_withdrawal.take() {
            Some(Withdrawal::Script { reward_address, coin, version, script_source, .. }) => {
                Withdrawal::Script {
                    reward_address,
                    coin,
                    version,
                    script_source,
                    redeemer: Some(Redeemer::new(data, ex_units)),
                }
            }
            Some(_) => misuse!("withdrawal_redeemer_value", "non-Plutus withdrawal"),
            None => misuse!("withdrawal_redeemer_value", "no pending withdrawal"),
        });
        self
    }

    // ---------------------------------------------------------------
    // Channel: Certificate — pushes directly, then pops/mutates/re-pushes.
    // ---------------------------------------------------------------

    fn push_basic_certificate(mut self, cert_type: CertType) -> Self {
        self.body.certificates.push(Certificate::Basic(cert_type));
        self
    }

    pub fn register_pool_certificate(self, pool_id: String, params_cbor_hex: String) -> Self {
        self.push_basic_certificate(CertType::RegisterPool { pool_id, params_cbor_hex })
    }

    pub fn retire_pool_certificate(self, pool_id: String, epoch: u64) -> Self {
        self.push_basic_certificate(CertType::RetirePool { pool_id, epoch })
    }

    pub fn register_stake_certificate(self, address: String) -> Self {
        self.push_basic_certificate(CertType::RegisterStake { address })
    }

    pub fn deregister_stake_certificate(self, address: String) -> Self {
        self.push_basic_certificate(CertType::DeregisterStake { address })
    }

    pub fn delegate_stake_certificate(self, address: String, pool_id: String) -> Self {
        self.push_basic_certificate(CertType::DelegateStake { address, pool_id })
    }

    /// Pops the last certificate, re-pushes as `SimpleScriptCertificate`
    /// (native) or `ScriptCertificate` (Plutus, when `version` is given),
    /// preserving any redeemer the popped certificate already carried.
    pub fn certificate_script(
        mut self,
        cbor_hex: impl Into<String>,
        version: Option<PlutusVersion>,
    ) -> Self {
        let cbor_hex = cbor_hex.into();
        let Some(last) = self.body.certificates.pop() else {
            misuse!("certificate_script", "no certificate to mutate")
        };
        let (cert_type, prior_redeemer) = match last {
            Certificate::Basic(cert_type) => (cert_type, None),
            Certificate::SimpleScript { cert_type, .. } => (cert_type, None),
            Certificate::Script { cert_type, redeemer, .. } => (cert_type, redeemer),
        };
        let script_source = Some(ScriptSource::Provided { cbor_hex, version });
        let rebuilt = match version {
            Some(_) => Certificate::Script { cert_type, script_source, redeemer: prior_redeemer },
            None => Certificate::SimpleScript { cert_type, script_source },
        };
        self.body.certificates.push(rebuilt);
        self
    }

    pub fn certificate_tx_in_reference(
        mut self,
        tx_hash: crate::primitives::TxHash,
        tx_index: u64,
        script_hash: Option<ScriptHash>,
        version: Option<PlutusVersion>,
    ) -> Self {
        let Some(last) = self.body.certificates.pop() else {
            misuse!("certificate_tx_in_reference", "no certificate to mutate")
        };
        let (cert_type, prior_redeemer) = match last {
            Certificate::Basic(cert_type) => (cert_type, None),
            Certificate::SimpleScript { cert_type, .. } => (cert_type, None),
            Certificate::Script { cert_type, redeemer, .. } => (cert_type, redeemer),
        };
        let script_source =
            Some(ScriptSource::Inline { tx_in: TxIn::new(tx_hash, tx_index), script_hash, version });
        let rebuilt = match version {
            Some(_) => Certificate::Script { cert_type, script_source, redeemer: prior_redeemer },
            None => Certificate::SimpleScript { cert_type, script_source },
        };
        self.body.certificates.push(rebuilt);
        self
    }

    pub fn certificate_redeemer_value(mut self, data: BuilderData, ex_units: Option<ExUnits>) -> Self {
        let Some(last) = self.body.certificates.pop() else {
            misuse!("certificate_redeemer_value", "no certificate to mutate")
        };
        let Certificate::Script { cert_type, script_source, .. } = last else {
            misuse!("certificate_redeemer_value", "non-ScriptCertificate");
        };
        self.body.certificates.push(Certificate::Script {
            cert_type,
            script_source,
            redeemer: Some(Redeemer::new(data, ex_units)),
        });
        self
    }

    // ---------------------------------------------------------------
    // Channel: Collateral
    // ---------------------------------------------------------------

    fn flush_collateral(&mut self) {
        if let Some(collateral) = self.pending_collateral.take() {
            self.body.collaterals.push(collateral);
        }
    }

    pub fn tx_in_collateral(
        mut self,
        tx_hash: crate::primitives::TxHash,
        tx_index: u64,
        amount: Option<Assets>,
        address: Option<Address>,
    ) -> Self {
        self.flush_collateral();
        self.pending_collateral =
            Some(InputRef { tx_in: TxIn::new(tx_hash, tx_index), amount, address });
        self
    }

    // ---------------------------------------------------------------
    // Global operations
    // ---------------------------------------------------------------

    pub fn change_address(mut self, address: Address) -> Self {
        self.body.change_address = Some(address);
        self
    }

    pub fn invalid_before(mut self, slot: u64) -> Self {
        self.body.invalid_before = Some(slot);
        self
    }

    pub fn invalid_hereafter(mut self, slot: u64) -> Self {
        self.body.invalid_hereafter = Some(slot);
        self
    }

    pub fn metadata_value(mut self, tag: u64, data: BuilderData) -> Self {
        self.body.metadata.insert(tag, data);
        self
    }

    pub fn signing_key(mut self, key_hex: impl Into<String>) -> Self {
        self.body.signing_keys.push(key_hex.into());
        self
    }

    pub fn required_signer_hash(mut self, hash: PubKeyHash) -> Self {
        self.body.required_signatures.push(hash);
        self
    }

    pub fn select_utxos_from(
        mut self,
        extra_inputs: Vec<Utxo>,
        strategy: crate::selection::Strategy,
        threshold: u64,
        include_tx_fees: bool,
    ) -> Self {
        self.body.extra_inputs = extra_inputs;
        self.body.selection_config = SelectionConfig { threshold, strategy, include_tx_fees };
        self
    }

    pub fn protocol_params(mut self, patch: crate::config::ProtocolParamsPatch) -> Self {
        self.protocol_params = self.protocol_params.with_override(patch);
        self
    }

    /// Tears down the builder, equivalent to a freshly constructed
    /// instance. The only teardown operation (§5): no locks or background
    /// tasks to release.
    pub fn reset(self) -> Self {
        Self::new()
    }

    /// Clears `body` and every pending channel slot, but — unlike
    /// [`TxBuilder::reset`] — leaves `protocol_params` untouched. Useful for
    /// reusing one configured builder across several transactions without
    /// re-supplying protocol parameters each time.
    pub fn empty_tx_builder_body(mut self) -> Self {
        self.body = BuilderBody::default();
        self.pending_input = None;
        self.pending_output = None;
        self.pending_mint = None;
        self.pending_withdrawal = None;
        self.pending_collateral = None;
        self.input_script_mode = None;
        self.mint_script_mode = None;
        self.withdrawal_script_mode = None;
        self
    }

    // ---------------------------------------------------------------
    // Finalize
    // ---------------------------------------------------------------

    /// Flushes every pending channel (output, input, collateral, mint,
    /// withdrawal, in that order), runs UTxO Selection to cover the net
    /// required value, removes duplicate inputs, and validates that every
    /// `Script` input / Plutus mint / `ScriptWithdrawal` / `ScriptCertificate`
    /// is complete.
    #[instrument(skip(self))]
    pub fn finalize(mut self) -> Result<BuilderBody, TxBuilderError> {
        self.flush_output();
        self.flush_input();
        self.flush_collateral();
        self.flush_mint();
        self.flush_withdrawal();

        let required = self.required_assets();
        let selected = crate::selection::select(
            &self.body.extra_inputs,
            &required,
            &self.body.selection_config,
        )?;
        for utxo in selected {
            self.body.inputs.push(Input::PubKey(InputRef {
                tx_in: utxo.input,
                amount: Some(utxo.amount),
                address: Some(utxo.address),
            }));
        }

        crate::dedup::remove_duplicate_inputs(&mut self.body.inputs);

        for input in &self.body.inputs {
            if let Input::Script { .. } = input {
                if !input.is_complete() {
                    return Err(TxBuilderError::IncompleteScriptInput(format!(
                        "{:?}",
                        input.tx_in()
                    )));
                }
            }
        }
        for mint in &self.body.mints {
            if mint.mint_type == MintType::Plutus && !mint.is_complete() {
                return Err(TxBuilderError::IncompleteMint(mint.policy_id.to_string()));
            }
        }
        for withdrawal in &self.body.withdrawals {
            if let Withdrawal::Script { reward_address, .. } = withdrawal {
                if !withdrawal.is_complete() {
                    return Err(TxBuilderError::IncompleteWithdrawal(reward_address.clone()));
                }
            }
        }
        for certificate in &self.body.certificates {
            if let Certificate::Script { .. } = certificate {
                if !certificate.is_complete() {
                    return Err(TxBuilderError::IncompleteCertificate);
                }
            }
        }

        Ok(self.body)
    }

    /// `Σ outputs.amount − Σ inputs.amount − Σ mints(positive) + Σ burns(negative)`.
    fn required_assets(&self) -> crate::primitives::value::AssetsDelta {
        let mut outputs = Assets::new();
        for output in &self.body.outputs {
            outputs = outputs + output.amount.clone();
        }

        let mut inputs = Assets::new();
        for input in &self.body.inputs {
            let amount = match input {
                Input::PubKey(i) | Input::SimpleScript { input: i, .. } => i.amount.clone(),
                Input::Script { input: i, .. } => i.amount.clone(),
            };
            if let Some(amount) = amount {
                inputs = inputs + amount;
            }
        }

        let mint_entries: Vec<(crate::primitives::value::Unit, num_bigint::BigInt)> = self
            .body
            .mints
            .iter()
            .map(|m| {
                let unit = crate::primitives::value::Unit::Native(
                    crate::primitives::value::AssetId::new(m.policy_id, m.asset_name.clone()),
                );
                (unit, m.amount.clone())
            })
            .collect();

        crate::selection::required_assets(&outputs, &inputs, &mint_entries)
    }
}
