//! Element registry backed by the `mendeleev` periodic table.

use crate::error::{Error, Result};
use mendeleev::ALL_ELEMENTS;
pub use mendeleev::Element;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Number of recognized elements, which is also the length of every composition vector
pub const N_ELEMENTS: usize = ALL_ELEMENTS.len();

/// Symbol table, built on first use and never mutated afterwards
fn registry() -> &'static HashMap<&'static str, Element> {
    static REGISTRY: OnceLock<HashMap<&'static str, Element>> = OnceLock::new();
    REGISTRY.get_or_init(|| ALL_ELEMENTS.iter().map(|e| (e.symbol(), *e)).collect())
}

/// Looks up an element by its symbol
/// Symbols are case sensitive ("Co" is cobalt, "CO" is not a symbol)
/// # Arguments
/// * `symbol` - element symbol
/// # Returns
/// * `Ok` - element
/// * `Err` - [`Error::UnknownElement`] if the symbol is not recognized
/// # Example
/// ```
/// use chemeq::element::{lookup, Element};
///
/// assert_eq!(lookup("Fe").unwrap(), Element::Fe);
/// assert!(lookup("Xx").is_err());
/// ```
pub fn lookup(symbol: &str) -> Result<Element> {
    registry()
        .get(symbol)
        .copied()
        .ok_or_else(|| Error::UnknownElement(symbol.to_string()))
}

/// Returns the position of the element in composition vectors (atomic number - 1)
pub fn index_of(element: Element) -> usize {
    element.atomic_number() as usize - 1
}

/// Returns the indicator vector of the element: length [`N_ELEMENTS`], 1 at its index, 0 elsewhere
/// # Example
/// ```
/// use chemeq::element::{indicator, Element, N_ELEMENTS};
///
/// let vector = indicator(Element::He);
/// assert_eq!(vector.len(), N_ELEMENTS);
/// assert_eq!(vector[1], 1);
/// assert_eq!(vector.iter().sum::<i64>(), 1);
/// ```
pub fn indicator(element: Element) -> Vec<i64> {
    let mut vector = vec![0; N_ELEMENTS];
    vector[index_of(element)] = 1;
    vector
}
