//! Strategy 4 (default): `experimental` — iterates required units from
//! least-available to most-available in the pool; for each, picks the
//! smallest single UTxO that fully covers it, falling back to largest-first
//! accumulation when no single UTxO suffices. Aims to minimize input count.

use std::collections::{BTreeMap, HashSet};

use num::Zero;
use num_bigint::{BigInt, BigUint, Sign};

use crate::error::TxBuilderError;
use crate::primitives::utxo::{TxIn, Utxo};
use crate::primitives::value::{AssetsDelta, Unit};

fn total_available(pool: &[Utxo], unit: &Unit) -> BigUint {
    pool.iter().fold(BigUint::zero(), |acc, u| acc + u.amount.get(unit))
}

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

        let available: Vec<&Utxo> = pool.iter().filter(|u| !used.contains(&u.input)).collect();

        // Prefer the smallest single UTxO that fully covers the remaining
        // requirement on its own.
        let need_unsigned = need.to_biguint().unwrap_or_else(BigUint::zero);
        let mut covering: Vec<&Utxo> =
            available.iter().copied().filter(|u| u.amount.get(unit) >= need_unsigned).collect();
        covering.sort_by(|a, b| a.amount.get(unit).cmp(&b.amount.get(unit)));

        let chosen = if let Some(utxo) = covering.into_iter().next() {
            Some(utxo)
        } else {
            // Fall back to largest-first accumulation.
            let mut by_size: Vec<&Utxo> = available
                .into_iter()
                .filter(|u| u.amount.get(unit) > BigUint::zero())
                .collect();
            by_size.sort_by(|a, b| b.amount.get(unit).cmp(&a.amount.get(unit)));
            by_size.into_iter().next()
        };

        let Some(utxo) = chosen else {
            return Err(TxBuilderError::Selection(format!(
                "experimental: short by {need} of required unit"
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
    let mut remaining: BTreeMap<Unit, BigInt> =
        required.only_positive().map(|(u, q)| (u.clone(), q.clone())).collect();

    let mut order: Vec<Unit> = remaining.keys().filter(|u| **u != Unit::Lovelace).cloned().collect();
    order.sort_by_key(|unit| total_available(pool, unit));

    let mut used: HashSet<TxIn> = HashSet::new();
    let mut selected: Vec<Utxo> = Vec::new();

    for unit in order {
        cover_unit(pool, &mut used, &mut remaining, &unit, &mut selected)?;
    }
    cover_unit(pool, &mut used, &mut remaining, &Unit::Lovelace, &mut selected)?;

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{TxHash};
    use crate::selection::tests::dummy_address;

    fn utxo(seed: u8, lovelace: u64) -> Utxo {
        Utxo::new(
            TxIn::new(TxHash::new([seed; 32]), 0),
            dummy_address(),
            crate::primitives::value::Assets::lovelace(lovelace),
        )
    }

    #[test]
    fn picks_smallest_single_covering_utxo() {
        let pool = vec![utxo(1, 3_000_000), utxo(2, 7_000_000), utxo(3, 20_000_000)];
        let mut required = AssetsDelta::default();
        required.add_unit(Unit::Lovelace, &BigInt::from(6_000_000));

        let selected = select(&pool, &required).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].input.tx_hash, pool[1].input.tx_hash);
    }

    #[test]
    fn falls_back_to_accumulation_when_no_single_utxo_covers() {
        let pool = vec![utxo(1, 3_000_000), utxo(2, 3_000_000), utxo(3, 3_000_000)];
        let mut required = AssetsDelta::default();
        required.add_unit(Unit::Lovelace, &BigInt::from(8_000_000));

        let selected = select(&pool, &required).unwrap();
        assert_eq!(selected.len(), 3);
    }
}
