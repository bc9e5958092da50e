//! Sparse compound → coefficient mapping used for each side of an equation.

use crate::compound::Compound;
use std::fmt::{Display, Formatter};
use std::ops::{Add, Mul, Neg, Sub};

/// Ordered mapping of compounds to integer coefficients
///
/// The map is sparse: [`get`](CoefficientMap::get) on a missing compound yields 0, and
/// [`set`](CoefficientMap::set) with 0 removes the compound, so no entry ever holds a zero.
/// Entries keep insertion order (used for display and matrix columns); equality ignores it.
/// # Example
/// ```
/// use chemeq::{CoefficientMap, Compound};
///
/// let water = Compound::parse("H2O").unwrap();
/// let mut map = CoefficientMap::new();
/// assert_eq!(map.get(&water), 0);
///
/// map.set(water.clone(), 2);
/// assert_eq!(map.get(&water), 2);
///
/// map.set(water.clone(), 0);
/// assert!(map.is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CoefficientMap {
    entries: Vec<(Compound, i64)>,
}
impl CoefficientMap {
    /// Creates an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the coefficient of `compound`, 0 if absent
    pub fn get(&self, compound: &Compound) -> i64 {
        self.position(compound).map_or(0, |i| self.entries[i].1)
    }

    /// Sets the coefficient of `compound`; a coefficient of 0 removes the entry
    pub fn set(&mut self, compound: Compound, coefficient: i64) {
        match (self.position(&compound), coefficient) {
            (Some(i), 0) => {
                self.entries.remove(i);
            }
            (Some(i), c) => self.entries[i].1 = c,
            (None, 0) => {}
            (None, c) => self.entries.push((compound, c)),
        }
    }

    /// Adds `delta` to the coefficient of `compound`
    /// # Panics
    /// If the coefficient overflows `i64` (see [`checked_add_to`](CoefficientMap::checked_add_to))
    pub fn add_to(&mut self, compound: Compound, delta: i64) {
        match self.get(&compound).checked_add(delta) {
            Some(coefficient) => self.set(compound, coefficient),
            None => panic!("coefficient of {compound} overflows when adding {delta}"),
        }
    }

    /// Adds `delta` to the coefficient of `compound`
    /// Returns `None`, leaving the map unchanged, if the coefficient overflows `i64`.
    pub fn checked_add_to(&mut self, compound: Compound, delta: i64) -> Option<()> {
        let coefficient = self.get(&compound).checked_add(delta)?;
        self.set(compound, coefficient);
        Some(())
    }

    /// Returns the per-compound sum of both maps, `None` if a coefficient overflows `i64`
    pub fn checked_add(&self, rhs: &CoefficientMap) -> Option<Self> {
        let mut sum = self.clone();
        for (compound, c) in rhs.iter() {
            sum.checked_add_to(compound.clone(), c)?;
        }
        Some(sum)
    }

    /// Returns true if `compound` has a nonzero coefficient
    pub fn contains(&self, compound: &Compound) -> bool {
        self.position(compound).is_some()
    }

    /// Iterates over `(compound, coefficient)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&Compound, i64)> + '_ {
        self.entries.iter().map(|(compound, c)| (compound, *c))
    }

    /// Iterates over compounds in insertion order
    pub fn compounds(&self) -> impl Iterator<Item = &Compound> + '_ {
        self.entries.iter().map(|(compound, _)| compound)
    }

    /// Iterates over coefficients in insertion order
    pub fn coefficients(&self) -> impl Iterator<Item = i64> + '_ {
        self.entries.iter().map(|(_, c)| *c)
    }

    /// Number of compounds
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no compounds
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a copy with every coefficient replaced by its absolute value
    pub fn abs(&self) -> Self {
        self.iter().map(|(compound, c)| (compound.clone(), c.abs())).collect()
    }

    /// Returns a copy with every coefficient raised to at least `n`
    /// With `n == 0` this drops every negative entry.
    pub fn max_with(&self, n: i64) -> Self {
        self.iter().map(|(compound, c)| (compound.clone(), c.max(n))).collect()
    }

    /// Returns a copy with every coefficient multiplied by `factor`
    /// # Panics
    /// If a coefficient overflows `i64` (see [`checked_scaled`](CoefficientMap::checked_scaled))
    pub fn scaled(&self, factor: i64) -> Self {
        self.checked_scaled(factor)
            .unwrap_or_else(|| panic!("scaling {self} by {factor} overflows"))
    }

    /// Returns a copy with every coefficient multiplied by `factor`, `None` on `i64` overflow
    pub fn checked_scaled(&self, factor: i64) -> Option<Self> {
        self.iter()
            .map(|(compound, c)| c.checked_mul(factor).map(|c| (compound.clone(), c)))
            .collect()
    }

    fn position(&self, compound: &Compound) -> Option<usize> {
        self.entries.iter().position(|(c, _)| c == compound)
    }
}

impl PartialEq for CoefficientMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(compound, c)| other.get(compound) == c)
    }
}
impl Eq for CoefficientMap {}

impl FromIterator<(Compound, i64)> for CoefficientMap {
    /// Collects pairs, summing coefficients of repeated compounds
    fn from_iter<T: IntoIterator<Item = (Compound, i64)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (compound, coefficient) in iter {
            map.add_to(compound, coefficient);
        }
        map
    }
}

impl Add<&CoefficientMap> for &CoefficientMap {
    type Output = CoefficientMap;

    fn add(self, rhs: &CoefficientMap) -> CoefficientMap {
        let mut sum = self.clone();
        for (compound, c) in rhs.iter() {
            sum.add_to(compound.clone(), c);
        }
        sum
    }
}

impl Add for CoefficientMap {
    type Output = CoefficientMap;

    fn add(self, rhs: CoefficientMap) -> CoefficientMap {
        &self + &rhs
    }
}

impl Sub<&CoefficientMap> for &CoefficientMap {
    type Output = CoefficientMap;

    fn sub(self, rhs: &CoefficientMap) -> CoefficientMap {
        self + &(-rhs)
    }
}

impl Sub for CoefficientMap {
    type Output = CoefficientMap;

    fn sub(self, rhs: CoefficientMap) -> CoefficientMap {
        &self - &rhs
    }
}

impl Neg for &CoefficientMap {
    type Output = CoefficientMap;

    fn neg(self) -> CoefficientMap {
        self.scaled(-1)
    }
}

impl Neg for CoefficientMap {
    type Output = CoefficientMap;

    fn neg(self) -> CoefficientMap {
        -&self
    }
}

impl Mul<i64> for &CoefficientMap {
    type Output = CoefficientMap;

    fn mul(self, rhs: i64) -> CoefficientMap {
        self.scaled(rhs)
    }
}

impl Mul<i64> for CoefficientMap {
    type Output = CoefficientMap;

    fn mul(self, rhs: i64) -> CoefficientMap {
        self.scaled(rhs)
    }
}

impl Display for CoefficientMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (compound, c)) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{compound}: {c}")?;
        }
        write!(f, "}}")
    }
}
