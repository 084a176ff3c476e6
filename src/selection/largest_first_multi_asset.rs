//! Strategy 2: `largestFirstMultiAsset` — covers each non-ADA unit with a
//! positive requirement first (largest-quantity-first), then lovelace last.
//! A selected UTxO reduces the requirement across every unit it carries,
//! not just the one being targeted.

use std::collections::{BTreeMap, HashSet};

use num::Zero;
use num_bigint::{BigInt, Sign};

use crate::error::TxBuilderError;
use crate::primitives::utxo::{TxIn, Utxo};
use crate::primitives::value::{AssetsDelta, Unit};

fn cover_unit(
    pool: &[Utxo],
    used: &mut HashSet<TxIn>,
    remaining: &mut BTreeMap<Unit, BigInt>,
    unit: &Unit,
    selected: &mut Vec<Utxo>,
) -> Result<(), TxBuilderError> {
    loop {
        let need = remaining.get(unit).cloned().unwrap_or_else(BigInt::zero);
        if need.sign() != Sign::Plus {
            return Ok(());
        }

        let mut candidates: Vec<&Utxo> =
            pool.iter().filter(|u| !used.contains(&u.input)).collect();
        candidates.sort_by(|a, b| b.amount.get(unit).cmp(&a.amount.get(unit)));

        let Some(utxo) = candidates.into_iter().find(|u| u.amount.get(unit) > num_bigint::BigUint::from(0u8))
        else {
            return Err(TxBuilderError::Selection(format!(
                "largestFirstMultiAsset: short by {need} of required unit"
            )));
        };

        used.insert(utxo.input);
        for (u, qty) in utxo.amount.iter() {
            let entry = remaining.entry(u.clone()).or_insert_with(BigInt::zero);
            *entry -= BigInt::from(qty.clone());
        }
        selected.push(utxo.clone());
    }
}

pub fn select(pool: &[Utxo], required: &AssetsDelta) -> Result<Vec<Utxo>, TxBuilderError> {
    let mut remaining: BTreeMap<Unit, BigInt> = required
        .only_positive()
        .map(|(unit, qty)| (unit.clone(), qty.clone()))
        .collect();

    let mut used: HashSet<TxIn> = HashSet::new();
    let mut selected: Vec<Utxo> = Vec::new();

    let non_lovelace_units: Vec<Unit> =
        remaining.keys().filter(|u| **u != Unit::Lovelace).cloned().collect();
    for unit in non_lovelace_units {
        cover_unit(pool, &mut used, &mut remaining, &unit, &mut selected)?;
    }
    cover_unit(pool, &mut used, &mut remaining, &Unit::Lovelace, &mut selected)?;

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::value::AssetId;
    use crate::primitives::{ScriptHash, TxHash};
    use crate::selection::tests::dummy_address;

    fn asset_utxo(seed: u8, lovelace: u64, token_qty: u64) -> Utxo {
        let mut amount = crate::primitives::value::Assets::lovelace(lovelace);
        let unit = Unit::Native(AssetId::new(ScriptHash::new([9; 28]), b"tok".to_vec()));
        amount.add_unit(unit, &num_bigint::BigUint::from(token_qty));
        Utxo::new(TxIn::new(TxHash::new([seed; 32]), 0), dummy_address(), amount)
    }

    #[test]
    fn covers_token_then_lovelace() {
        let pool = vec![asset_utxo(1, 2_000_000, 0), asset_utxo(2, 2_000_000, 50)];
        let unit = Unit::Native(AssetId::new(ScriptHash::new([9; 28]), b"tok".to_vec()));

        let mut required = AssetsDelta::default();
        required.add_unit(unit, &BigInt::from(10));
        required.add_unit(Unit::Lovelace, &BigInt::from(3_000_000));

        let selected = select(&pool, &required).unwrap();
        // The token-bearing utxo covers both the token and part of the
        // lovelace requirement; a second pass tops up the remaining ADA.
        assert_eq!(selected.len(), 2);
    }
}
