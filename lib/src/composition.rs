//! Element multiset of a compound.

use crate::element::{self, Element, N_ELEMENTS};
use std::hash::{Hash, Hasher};

/// Mapping of elements to positive counts, e.g. `{N: 2, H: 8, S: 1, O: 4}` for `(NH4)2SO4`
///
/// Entries keep the order in which elements first appeared. Equality and hashing
/// ignore that order.
#[derive(Clone, Debug, Default)]
pub struct Composition {
    counts: Vec<(Element, u32)>,
}
impl Composition {
    /// Creates an empty composition
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the count of `element` (0 if absent)
    pub fn get(&self, element: Element) -> u32 {
        self.counts
            .iter()
            .find(|(e, _)| *e == element)
            .map_or(0, |(_, n)| *n)
    }

    /// Adds `count` atoms of `element`
    /// # Returns
    /// * `Some(())` - on success
    /// * `None` - if the count would overflow
    pub fn add(&mut self, element: Element, count: u32) -> Option<()> {
        match self.counts.iter_mut().find(|(e, _)| *e == element) {
            Some((_, n)) => *n = n.checked_add(count)?,
            None => {
                if count > 0 {
                    self.counts.push((element, count));
                }
            }
        }
        Some(())
    }

    /// Adds every element of `other` into `self`
    pub fn merge(&mut self, other: &Composition) -> Option<()> {
        for (element, count) in other.iter() {
            self.add(element, count)?;
        }
        Some(())
    }

    /// Returns a copy with every count multiplied by `factor`
    pub fn scaled(&self, factor: u32) -> Option<Composition> {
        let counts = self
            .counts
            .iter()
            .map(|(e, n)| n.checked_mul(factor).map(|n| (*e, n)))
            .collect::<Option<Vec<_>>>()?;
        Some(Self { counts })
    }

    /// Iterates over `(element, count)` pairs in order of first appearance
    pub fn iter(&self) -> impl Iterator<Item = (Element, u32)> + '_ {
        self.counts.iter().copied()
    }

    /// Number of distinct elements
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if there are no elements
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Composition vector: count-weighted sum of the element indicator vectors
    pub fn vector(&self) -> Vec<i64> {
        let mut vector = vec![0; N_ELEMENTS];
        for (e, n) in self.iter() {
            vector[element::index_of(e)] += i64::from(n);
        }
        vector
    }

    /// Pairs sorted by atomic number
    fn sorted(&self) -> Vec<(u32, u32)> {
        let mut sorted: Vec<(u32, u32)> = self
            .counts
            .iter()
            .map(|(e, n)| (e.atomic_number(), *n))
            .collect();
        sorted.sort_unstable();
        sorted
    }
}

impl PartialEq for Composition {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(e, n)| other.get(e) == n)
    }
}
impl Eq for Composition {}

impl Hash for Composition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted().hash(state);
    }
}

impl FromIterator<(Element, u32)> for Composition {
    fn from_iter<T: IntoIterator<Item = (Element, u32)>>(iter: T) -> Self {
        let mut composition = Composition::new();
        for (element, count) in iter {
            // counts saturate at u32::MAX
            if composition.add(element, count).is_none() {
                if let Some((_, n)) = composition.counts.iter_mut().find(|(e, _)| *e == element) {
                    *n = u32::MAX;
                }
            }
        }
        composition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_accumulates_and_keeps_first_order() {
        let mut composition = Composition::new();
        composition.add(Element::O, 1).unwrap();
        composition.add(Element::H, 2).unwrap();
        composition.add(Element::O, 3).unwrap();

        assert_eq!(composition.get(Element::O), 4);
        assert_eq!(composition.get(Element::H), 2);
        assert_eq!(composition.get(Element::C), 0);
        assert_eq!(
            composition.iter().collect::<Vec<_>>(),
            vec![(Element::O, 4), (Element::H, 2)]
        );
    }

    #[test]
    fn zero_counts_are_not_stored() {
        let mut composition = Composition::new();
        composition.add(Element::H, 0).unwrap();
        assert!(composition.is_empty());
    }

    #[test]
    fn equality_ignores_order() {
        let a: Composition = [(Element::H, 2), (Element::O, 1)].into_iter().collect();
        let b: Composition = [(Element::O, 1), (Element::H, 2)].into_iter().collect();
        let c: Composition = [(Element::O, 2), (Element::H, 2)].into_iter().collect();

        assert_eq!(a, b);
        assert_ne!(a, c);

        use std::collections::hash_map::DefaultHasher;
        let hash = |x: &Composition| {
            let mut hasher = DefaultHasher::new();
            x.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash(&a), hash(&b));
    }

    #[test]
    fn scaling_and_merging() {
        let mut sulfate: Composition = [(Element::S, 1), (Element::O, 4)].into_iter().collect();
        sulfate = sulfate.scaled(3).unwrap();
        assert_eq!(sulfate.get(Element::O), 12);

        let mut total: Composition = [(Element::Al, 2)].into_iter().collect();
        total.merge(&sulfate).unwrap();
        assert_eq!(total.len(), 3);
        assert_eq!(total.get(Element::S), 3);

        assert!(total.scaled(u32::MAX).is_none());
    }

    #[test]
    fn vector_counts_atoms() {
        let water: Composition = [(Element::H, 2), (Element::O, 1)].into_iter().collect();
        let vector = water.vector();
        assert_eq!(vector.len(), N_ELEMENTS);
        assert_eq!(vector[0], 2);
        assert_eq!(vector[7], 1);
        assert_eq!(vector.iter().sum::<i64>(), 3);
    }

    #[test]
    fn sorted_by_atomic_number() {
        let sulfuric: Composition = [(Element::S, 1), (Element::O, 4), (Element::H, 2)].into_iter().collect();
        assert_eq!(sulfuric.sorted(), vec![(1, 2), (8, 4), (16, 1)]);
    }
}
