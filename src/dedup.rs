//! Deduplication: a transaction's input set must carry no `(txHash, index)`
//! pair twice. First occurrence wins; later duplicates are dropped without
//! complaint, and relative order of the surviving inputs is preserved.

use std::collections::HashSet;

use crate::builder::script::Input;
use crate::primitives::utxo::TxIn;

pub fn remove_duplicate_inputs(inputs: &mut Vec<Input>) {
    let mut seen: HashSet<TxIn> = HashSet::new();
    inputs.retain(|input| seen.insert(input.tx_in()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::script::InputRef;
    use crate::primitives::TxHash;

    fn pubkey_input(seed: u8, index: u64) -> Input {
        Input::PubKey(InputRef {
            tx_in: TxIn::new(TxHash::new([seed; 32]), index),
            amount: None,
            address: None,
        })
    }

    #[test]
    fn first_occurrence_wins_and_order_is_preserved() {
        let mut inputs = vec![pubkey_input(1, 0), pubkey_input(2, 0), pubkey_input(1, 0)];
        remove_duplicate_inputs(&mut inputs);

        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].tx_in(), TxIn::new(TxHash::new([1; 32]), 0));
        assert_eq!(inputs[1].tx_in(), TxIn::new(TxHash::new([2; 32]), 0));
    }

    #[test]
    fn is_idempotent() {
        let mut inputs = vec![pubkey_input(1, 0), pubkey_input(1, 0)];
        remove_duplicate_inputs(&mut inputs);
        let once = inputs.clone();
        remove_duplicate_inputs(&mut inputs);
        assert_eq!(inputs, once);
    }

    #[test]
    fn distinguishes_by_index_not_just_hash() {
        let mut inputs = vec![pubkey_input(1, 0), pubkey_input(1, 1)];
        remove_duplicate_inputs(&mut inputs);
        assert_eq!(inputs.len(), 2);
    }
}
