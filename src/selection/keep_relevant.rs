//! Strategy 3: `keepRelevant` — prefilter to UTxOs carrying any
//! non-lovelace unit that's actually required, then run the lovelace-only
//! `largestFirst` pass over (prefiltered ++ rest).

use crate::error::TxBuilderError;
use crate::primitives::utxo::Utxo;
use crate::primitives::value::{AssetsDelta, Unit};

use super::largest_first;

pub fn select(pool: &[Utxo], required: &AssetsDelta) -> Result<Vec<Utxo>, TxBuilderError> {
    let required_units: Vec<&Unit> = required
        .only_positive()
        .map(|(unit, _)| unit)
        .filter(|unit| **unit != Unit::Lovelace)
        .collect();

    let is_relevant = |utxo: &&Utxo| -> bool {
        required_units.iter().any(|unit| utxo.amount.get(unit) > num_bigint::BigUint::from(0u8))
    };

    let mut reordered: Vec<Utxo> = pool.iter().filter(is_relevant).cloned().collect();
    reordered.extend(pool.iter().filter(|u| !is_relevant(u)).cloned());

    largest_first::select(&reordered, required)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::value::AssetId;
    use crate::primitives::utxo::TxIn;
    use crate::primitives::{ScriptHash, TxHash};
    use crate::selection::tests::dummy_address;
    use num_bigint::{BigInt, BigUint};

    fn utxo(seed: u8, lovelace: u64, token_qty: u64) -> Utxo {
        let mut amount = crate::primitives::value::Assets::lovelace(lovelace);
        if token_qty > 0 {
            let unit = Unit::Native(AssetId::new(ScriptHash::new([7; 28]), b"tok".to_vec()));
            amount.add_unit(unit, &BigUint::from(token_qty));
        }
        Utxo::new(TxIn::new(TxHash::new([seed; 32]), 0), dummy_address(), amount)
    }

    #[test]
    fn prefers_relevant_utxos_when_lovelace_amounts_tie() {
        let pool = vec![utxo(1, 5_000_000, 0), utxo(2, 5_000_000, 100)];
        let unit = Unit::Native(AssetId::new(ScriptHash::new([7; 28]), b"tok".to_vec()));

        let mut required = AssetsDelta::default();
        required.add_unit(unit, &BigInt::from(50));
        required.add_unit(Unit::Lovelace, &BigInt::from(5_000_000));

        let selected = select(&pool, &required).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].input.tx_hash, pool[1].input.tx_hash);
    }
}
