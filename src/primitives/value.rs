//! Multi-asset value algebra: add/subtract asset bundles and compare by
//! coverage. This is the component the corpus delegates to an external
//! asset-delta crate for; here it's built in-house, since required-value
//! arithmetic is exactly the kind of thing this crate owns end to end.

use std::collections::BTreeMap;
use std::ops::{Add, Sub};

use num_bigint::{BigInt, BigUint};
use num::Zero;

use super::{AssetName, PolicyId};

/// A non-ADA asset's unit: policy id plus asset name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetId {
    pub policy: PolicyId,
    pub name: AssetName,
}

impl AssetId {
    pub fn new(policy: PolicyId, name: AssetName) -> Self {
        Self { policy, name }
    }

    /// `unit` as policy-id hex followed by hex-encoded asset name, matching
    /// the wire convention described for `Asset.unit`.
    pub fn unit(&self) -> String {
        format!("{policy}{name}", policy = self.policy, name = hex::encode(&self.name))
    }
}

/// Every distinguishable value unit: the native ADA unit, or a native/Plutus
/// minted asset keyed by `(policyId, assetName)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Unit {
    Lovelace,
    Native(AssetId),
}

/// An unsigned multi-asset bundle: `unit -> quantity`. Quantities are
/// non-negative big integers so a transaction can carry arbitrarily large
/// token amounts without risking IEEE-754 precision loss.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assets(BTreeMap<Unit, BigUint>);

impl Assets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lovelace(amount: u64) -> Self {
        let mut map = BTreeMap::new();
        map.insert(Unit::Lovelace, BigUint::from(amount));
        Self(map)
    }

    pub fn get(&self, unit: &Unit) -> BigUint {
        self.0.get(unit).cloned().unwrap_or_else(BigUint::zero)
    }

    pub fn set(&mut self, unit: Unit, amount: BigUint) {
        if amount.is_zero() {
            self.0.remove(&unit);
        } else {
            self.0.insert(unit, amount);
        }
    }

    pub fn add_unit(&mut self, unit: Unit, amount: &BigUint) {
        let entry = self.0.entry(unit).or_insert_with(BigUint::zero);
        *entry += amount;
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Unit, &BigUint)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn lovelace_amount(&self) -> BigUint {
        self.get(&Unit::Lovelace)
    }

    /// Signed difference `self - other`, kept as-is (may contain negative
    /// entries): the required-assets map described for UTxO Selection is
    /// exactly this delta.
    pub fn delta(&self, other: &Assets) -> AssetsDelta {
        let mut map: BTreeMap<Unit, BigInt> = BTreeMap::new();
        for (unit, qty) in self.0.iter() {
            *map.entry(unit.clone()).or_insert_with(BigInt::zero) += BigInt::from(qty.clone());
        }
        for (unit, qty) in other.0.iter() {
            *map.entry(unit.clone()).or_insert_with(BigInt::zero) -= BigInt::from(qty.clone());
        }
        map.retain(|_, v| !v.is_zero());
        AssetsDelta(map)
    }
}

impl Add for Assets {
    type Output = Assets;

    fn add(mut self, rhs: Assets) -> Assets {
        for (unit, qty) in rhs.0 {
            self.add_unit(unit, &qty);
        }
        self
    }
}

impl Sub for Assets {
    type Output = Assets;

    /// Saturating: units that would go negative are clamped to zero rather
    /// than producing a signed bundle. Callers that need the signed
    /// difference should use [`Assets::delta`] instead.
    fn sub(mut self, rhs: Assets) -> Assets {
        for (unit, qty) in rhs.0 {
            let current = self.get(&unit);
            let next = current.clone() - qty.min(current);
            self.set(unit, next);
        }
        self
    }
}

/// A signed multi-asset bundle, used for the required-value map driving
/// UTxO Selection (`Σ outputs − Σ inputs − Σ mints + Σ burns`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetsDelta(BTreeMap<Unit, BigInt>);

impl AssetsDelta {
    pub fn get(&self, unit: &Unit) -> BigInt {
        self.0.get(unit).cloned().unwrap_or_else(BigInt::zero)
    }

    pub fn set(&mut self, unit: Unit, amount: BigInt) {
        if amount.is_zero() {
            self.0.remove(&unit);
        } else {
            self.0.insert(unit, amount);
        }
    }

    pub fn add_unit(&mut self, unit: Unit, amount: &BigInt) {
        let entry = self.0.entry(unit).or_insert_with(BigInt::zero);
        *entry += amount;
    }

    /// Entries with a strictly positive requirement, i.e. units still owed
    /// after accounting for what's already covered.
    pub fn only_positive(&self) -> impl Iterator<Item = (&Unit, &BigInt)> {
        self.0.iter().filter(|(_, qty)| qty.sign() == num_bigint::Sign::Plus)
    }

    pub fn is_fully_covered(&self) -> bool {
        self.only_positive().next().is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Unit, &BigInt)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset_id(policy_byte: u8, name: &str) -> AssetId {
        AssetId::new(PolicyId::new([policy_byte; 28]), name.as_bytes().to_vec())
    }

    #[test]
    fn round_trip_sum_minus_sum_is_empty() {
        let mut a = Assets::lovelace(10_000_000);
        a.add_unit(Unit::Native(asset_id(1, "token")), &BigUint::from(5u64));

        let delta = a.clone().delta(&a);
        assert!(delta.is_fully_covered());
        assert_eq!(delta, AssetsDelta::default());
    }

    #[test]
    fn saturating_sub_never_goes_negative() {
        let small = Assets::lovelace(1_000_000);
        let large = Assets::lovelace(5_000_000);

        let result = small - large;
        assert_eq!(result.lovelace_amount(), BigUint::zero());
    }

    #[test]
    fn delta_reports_only_outstanding_units() {
        let outputs = Assets::lovelace(9_000_000);
        let inputs = Assets::lovelace(4_000_000);

        let required = outputs.delta(&inputs);
        let lovelace_required: Vec<_> = required.only_positive().collect();
        assert_eq!(lovelace_required.len(), 1);
        assert_eq!(*lovelace_required[0].1, BigInt::from(5_000_000));
    }
}
