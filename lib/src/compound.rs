//! Chemical compounds.

use crate::composition::Composition;
use crate::element::Element;
use crate::error::{Error, Result};
use crate::resolve::{closing_index, resolve};
use crate::token::{tokenize, Token};
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A struct that represents a chemical compound (e.g. H2O, NaCl, ...)
///
/// Two compounds are equal when their element counts are equal; the display string
/// is not part of the identity.
/// # Example
/// ```
/// use chemeq::Compound;
///
/// let compound = Compound::parse("(NH4)2SO4").unwrap();
/// assert_eq!(compound.to_string(), "(NH4)2SO4");
/// assert_eq!(compound, Compound::parse("N2H8SO4").unwrap());
/// ```
#[derive(Clone, Debug)]
pub struct Compound {
    /// Element counts
    composition: Composition,
    /// Composition vector, always recomputed from `composition`
    vector: Vec<i64>,
    /// String from which the compound was parsed, without redundant outer grouping
    display: Option<String>,
}
impl Compound {
    /// Creates a compound from element counts and an optional display string
    /// # Example
    /// ```
    /// use chemeq::Compound;
    /// use chemeq::element::Element;
    ///
    /// let water = Compound::from_composition([(Element::H, 2), (Element::O, 1)].into_iter().collect(), None);
    /// assert_eq!(water.to_string(), "H2O");
    /// assert_eq!(water.count(Element::H), 2);
    /// ```
    pub fn from_composition(composition: Composition, display: Option<String>) -> Self {
        let vector = composition.vector();
        Self {
            composition,
            vector,
            display,
        }
    }

    /// Parses a compound from a formula string
    /// Whitespace is ignored. A pair of delimiters wrapping the whole formula is stripped
    /// (repeatedly) from the display string, so `((H2O))` displays as `H2O`.
    /// # Arguments
    /// * `input` - formula, e.g. `Fe2(SO4)3`
    /// # Returns
    /// * `Ok` - compound
    /// * `Err` - [`Error::InvalidSyntax`] or [`Error::UnknownElement`]
    pub fn parse(input: &str) -> Result<Self> {
        let formula: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        let tokens = tokenize(&formula)?;
        let composition = resolve(&tokens)?;

        let mut span: &[Token] = &tokens;
        let mut display: &str = &formula;
        while let Some(Token::Open(delimiter)) = span.first() {
            if closing_index(span, 1, *delimiter)? != span.len() - 1 {
                break;
            }
            span = &span[1..span.len() - 1];
            // delimiters are single ASCII bytes
            display = &display[1..display.len() - 1];
        }

        Ok(Self::from_composition(composition, Some(display.to_string())))
    }

    /// Parses every formula in `inputs`
    /// # Example
    /// ```
    /// use chemeq::Compound;
    ///
    /// let compounds = Compound::parse_list(&["CH4", "O2"]).unwrap();
    /// assert_eq!(compounds.len(), 2);
    /// ```
    pub fn parse_list(inputs: &[&str]) -> Result<Vec<Self>> {
        inputs.iter().map(|input| Self::parse(input)).collect()
    }

    /// Returns the element counts
    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    /// Returns the number of atoms of `element` in one formula unit
    pub fn count(&self, element: Element) -> u32 {
        self.composition.get(element)
    }

    /// Iterates over `(element, count)` pairs in order of first appearance
    pub fn elements(&self) -> impl Iterator<Item = (Element, u32)> + '_ {
        self.composition.iter()
    }

    /// Returns the composition vector (indexed by atomic number - 1)
    pub fn vector(&self) -> &[i64] {
        &self.vector
    }

    /// Returns the display string, if the compound has one
    pub fn display_str(&self) -> Option<&str> {
        self.display.as_deref()
    }
}

impl PartialEq for Compound {
    fn eq(&self, other: &Self) -> bool {
        self.composition == other.composition
    }
}
impl Eq for Compound {}

impl Hash for Compound {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.composition.hash(state);
    }
}

impl Display for Compound {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(display) = &self.display {
            return write!(f, "{display}");
        }
        for (element, count) in self.composition.iter() {
            if count == 1 {
                write!(f, "{}", element.symbol())?;
            } else {
                write!(f, "{}{}", element.symbol(), count)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Compound {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ammonium_sulfate() {
        let compound = Compound::parse("(NH4)2SO4").unwrap();
        assert_eq!(compound.count(Element::N), 2);
        assert_eq!(compound.count(Element::H), 8);
        assert_eq!(compound.count(Element::S), 1);
        assert_eq!(compound.count(Element::O), 4);
        assert_eq!(compound.display_str(), Some("(NH4)2SO4"));
    }

    #[test]
    fn strips_redundant_outer_grouping() {
        let compound = Compound::parse("{[(H2O)]}").unwrap();
        assert_eq!(compound.display_str(), Some("H2O"));

        let compound = Compound::parse(" ( C O 2 ) ").unwrap();
        assert_eq!(compound.to_string(), "CO2");
    }

    #[test]
    fn keeps_meaningful_grouping() {
        assert_eq!(Compound::parse("(OH)2").unwrap().to_string(), "(OH)2");
        assert_eq!(Compound::parse("(CH3)(CH3)").unwrap().to_string(), "(CH3)(CH3)");
        assert_eq!(Compound::parse("(H)O(H)").unwrap().to_string(), "(H)O(H)");
    }

    #[test]
    fn equality_ignores_display_string() {
        let a = Compound::parse("H2O").unwrap();
        let b = Compound::parse("HOH").unwrap();
        assert_eq!(a, b);
        assert_ne!(a.to_string(), b.to_string());
        assert_ne!(a, Compound::parse("H2O2").unwrap());
    }

    #[test]
    fn vector_matches_composition() {
        let compound = Compound::parse("Ca3(PO4)2").unwrap();
        assert_eq!(compound.vector(), compound.composition().vector().as_slice());
        assert_eq!(compound.vector()[19], 3);
        assert_eq!(compound.vector()[14], 2);
        assert_eq!(compound.vector()[7], 8);
    }

    #[test]
    fn generated_display_without_string() {
        let compound = Compound::from_composition(
            [(Element::Na, 1), (Element::Cl, 1)].into_iter().collect(),
            None,
        );
        assert_eq!(compound.to_string(), "NaCl");
        assert_eq!(compound.display_str(), None);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(Compound::parse("Xx2"), Err(Error::UnknownElement("Xx".to_string())));
        assert!(matches!(Compound::parse("H(2"), Err(Error::InvalidSyntax(_))));
        assert!(matches!(Compound::parse(""), Err(Error::InvalidSyntax(_))));
        assert!(matches!("H2-O".parse::<Compound>(), Err(Error::InvalidSyntax(_))));
    }
}
