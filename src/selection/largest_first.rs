//! Strategy 1: `largestFirst` — lovelace only, sorted descending, consumed
//! until the requirement is covered.

use num_bigint::{BigInt, Sign};

use crate::error::TxBuilderError;
use crate::primitives::utxo::Utxo;
use crate::primitives::value::{AssetsDelta, Unit};

pub fn select(pool: &[Utxo], required: &AssetsDelta) -> Result<Vec<Utxo>, TxBuilderError> {
    let mut needed = required.get(&Unit::Lovelace);
    if needed.sign() != Sign::Plus {
        return Ok(vec![]);
    }

    // `sort_by_key` is a stable sort: equal-lovelace candidates keep their
    // original pool order, matching §4.2's tie-break rule.
    let mut candidates: Vec<&Utxo> = pool.iter().collect();
    candidates.sort_by(|a, b| b.amount.lovelace_amount().cmp(&a.amount.lovelace_amount()));

    let mut selected = Vec::new();
    for utxo in candidates {
        if needed.sign() != Sign::Plus {
            break;
        }
        needed -= BigInt::from(utxo.amount.lovelace_amount());
        selected.push(utxo.clone());
    }

    if needed.sign() == Sign::Plus {
        return Err(TxBuilderError::Selection(format!(
            "largestFirst: short by {needed} lovelace"
        )));
    }

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::tests::utxo_with_lovelace;
    use num_bigint::BigInt;

    #[test]
    fn picks_single_utxo_when_sufficient() {
        let pool = vec![
            utxo_with_lovelace(1, 3_000_000),
            utxo_with_lovelace(2, 5_000_000),
            utxo_with_lovelace(3, 10_000_000),
        ];
        let mut required = AssetsDelta::default();
        required.add_unit(Unit::Lovelace, &BigInt::from(6_000_000));

        let selected = select(&pool, &required).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].input.tx_hash, pool[2].input.tx_hash);
    }

    #[test]
    fn accumulates_largest_first_in_order() {
        let pool = vec![utxo_with_lovelace(1, 3_000_000), utxo_with_lovelace(2, 5_000_000)];
        let mut required = AssetsDelta::default();
        required.add_unit(Unit::Lovelace, &BigInt::from(6_000_000));

        let selected = select(&pool, &required).unwrap();
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].input.tx_hash, pool[1].input.tx_hash);
        assert_eq!(selected[1].input.tx_hash, pool[0].input.tx_hash);
    }

    #[test]
    fn errors_when_pool_insufficient() {
        let pool = vec![utxo_with_lovelace(1, 3_000_000)];
        let mut required = AssetsDelta::default();
        required.add_unit(Unit::Lovelace, &BigInt::from(6_000_000));

        assert!(select(&pool, &required).is_err());
    }
}
