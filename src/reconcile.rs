//! Evaluation Reconciler: folds an `Evaluator`'s execution-unit estimates
//! back onto the redeemer slots that requested them.
//!
//! Matching is purely positional: `Action.index` is the position of the
//! corresponding item in its own channel (inputs, mints, withdrawals,
//! certificates), not a position in the whole transaction. An action with no
//! matching slot, or one that targets a non-script item, is silently
//! skipped — this is the one place in the builder where a malformed input
//! does not surface as an error to the caller, since an `Evaluator` is an
//! external collaborator and its output is advisory.

use serde::{Deserialize, Serialize};

use crate::builder::script::{Certificate, ExUnits, Input, Withdrawal};
use crate::builder::BuilderBody;

/// Matches the evaluator's own tagging of which redeemer a budget belongs
/// to; deserializable so an `Evaluator` impl can decode it straight off an
/// evaluation response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tag {
    Spend,
    Mint,
    Cert,
    Reward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub tag: Tag,
    pub index: usize,
    pub budget: ExUnits,
}

/// `⌊budget × multiplier⌋`, per the evaluation-reconciliation budget rule.
fn scaled(budget: ExUnits, multiplier: f64) -> ExUnits {
    ExUnits {
        mem: ((budget.mem as f64) * multiplier).floor() as u64,
        steps: ((budget.steps as f64) * multiplier).floor() as u64,
    }
}

/// Applies every action in `actions` to `body`, scaling each matched budget
/// by `multiplier` before writing it into the redeemer slot.
pub fn reconcile(body: &mut BuilderBody, actions: &[Action], multiplier: f64) {
    for action in actions {
        let ex_units = scaled(action.budget, multiplier);
        match action.tag {
            Tag::Spend => {
                if let Some(Input::Script { redeemer: Some(redeemer), .. }) =
                    body.inputs.get_mut(action.index)
                {
                    redeemer.ex_units = ex_units;
                }
            }
            Tag::Mint => {
                if let Some(mint) = body.mints.get_mut(action.index) {
                    if let Some(redeemer) = mint.redeemer.as_mut() {
                        redeemer.ex_units = ex_units;
                    }
                }
            }
            Tag::Cert => {
                if let Some(Certificate::Script { redeemer: Some(redeemer), .. }) =
                    body.certificates.get_mut(action.index)
                {
                    redeemer.ex_units = ex_units;
                }
            }
            Tag::Reward => {
                if let Some(Withdrawal::Script { redeemer: Some(redeemer), .. }) =
                    body.withdrawals.get_mut(action.index)
                {
                    redeemer.ex_units = ex_units;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::script::{DatumSource, InputRef, Redeemer, ScriptSource};
    use crate::primitives::data::{BuilderData, PlutusData};
    use crate::primitives::utxo::TxIn;
    use crate::primitives::{PlutusVersion, TxHash};

    fn script_input() -> Input {
        Input::Script {
            input: InputRef { tx_in: TxIn::new(TxHash::new([1; 32]), 0), amount: None, address: None },
            version: Some(PlutusVersion::V2),
            script_source: Some(ScriptSource::Provided { cbor_hex: "00".into(), version: Some(PlutusVersion::V2) }),
            datum_source: Some(DatumSource::Inline),
            redeemer: Some(Redeemer::new(BuilderData::Mesh(PlutusData::Integer(0.into())), None)),
        }
    }

    #[test]
    fn spend_action_scales_matched_redeemer_budget() {
        let mut body = BuilderBody::default();
        body.inputs.push(script_input());

        let actions = vec![Action { tag: Tag::Spend, index: 0, budget: ExUnits { mem: 1000, steps: 2000 } }];
        reconcile(&mut body, &actions, 1.1);

        let Input::Script { redeemer: Some(redeemer), .. } = &body.inputs[0] else {
            panic!("expected script input")
        };
        assert_eq!(redeemer.ex_units.mem, 1100);
        assert_eq!(redeemer.ex_units.steps, 2200);
    }

    #[test]
    fn scaled_budget_rounds_down_not_up() {
        let mut body = BuilderBody::default();
        body.inputs.push(script_input());

        // 999 * 1.1 = 1098.9 and 1777 * 1.1 = 1954.7: both land strictly
        // between integers, so a correct floor (not ceil/round) must produce
        // 1098 and 1954.
        let actions = vec![Action { tag: Tag::Spend, index: 0, budget: ExUnits { mem: 999, steps: 1777 } }];
        reconcile(&mut body, &actions, 1.1);

        let Input::Script { redeemer: Some(redeemer), .. } = &body.inputs[0] else {
            panic!("expected script input")
        };
        assert_eq!(redeemer.ex_units.mem, 1098);
        assert_eq!(redeemer.ex_units.steps, 1954);
    }

    #[test]
    fn action_with_no_matching_slot_is_skipped_not_errored() {
        let mut body = BuilderBody::default();
        body.inputs.push(script_input());

        let actions = vec![Action { tag: Tag::Spend, index: 5, budget: ExUnits { mem: 1, steps: 1 } }];
        reconcile(&mut body, &actions, 1.1);

        let Input::Script { redeemer: Some(redeemer), .. } = &body.inputs[0] else {
            panic!("expected script input")
        };
        assert_eq!(redeemer.ex_units, ExUnits::DEFAULT);
    }

    #[test]
    fn action_targeting_pubkey_input_is_skipped() {
        let mut body = BuilderBody::default();
        body.inputs.push(Input::PubKey(InputRef {
            tx_in: TxIn::new(TxHash::new([2; 32]), 0),
            amount: None,
            address: None,
        }));

        let actions = vec![Action { tag: Tag::Spend, index: 0, budget: ExUnits { mem: 1, steps: 1 } }];
        reconcile(&mut body, &actions, 1.1);
        assert!(matches!(body.inputs[0], Input::PubKey(_)));
    }
}
