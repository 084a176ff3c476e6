//! Channel: Output.

use crate::primitives::data::BuilderData;
use crate::primitives::value::Assets;
use crate::primitives::{Address, PlutusVersion};

#[derive(Debug, Clone, PartialEq)]
pub enum OutputDatum {
    Hash(BuilderData),
    Inline(BuilderData),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputReferenceScript {
    pub version: PlutusVersion,
    pub code_cbor_hex: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    pub address: Address,
    pub amount: Assets,
    pub datum: Option<OutputDatum>,
    pub reference_script: Option<OutputReferenceScript>,
}

impl Output {
    pub fn new(address: Address, amount: Assets) -> Self {
        Self { address, amount, datum: None, reference_script: None }
    }

    /// `txOutDatumHashValue` / `txOutInlineDatumValue`: mutate the pending
    /// output only; no-op (per §4.1) if called with nothing pending is
    /// handled by the caller (`builder::output`), not here.
    pub fn with_datum_hash(mut self, data: BuilderData) -> Self {
        self.datum = Some(OutputDatum::Hash(data));
        self
    }

    pub fn with_inline_datum(mut self, data: BuilderData) -> Self {
        self.datum = Some(OutputDatum::Inline(data));
        self
    }

    pub fn with_reference_script(mut self, version: PlutusVersion, code_cbor_hex: String) -> Self {
        self.reference_script = Some(OutputReferenceScript { version, code_cbor_hex });
        self
    }
}
