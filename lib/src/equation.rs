//! Chemical equations and reaction algebra.

use crate::balance;
use crate::coefficients::CoefficientMap;
use crate::compound::Compound;
use crate::error::{Error, Result};
use crate::token::{tokenize, Token};
use malachite::num::arithmetic::traits::Gcd;
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;
use tracing::debug;

/// Arrows separating reactants from products
pub const ARROWS: [&str; 2] = ["->", "→"];

/// A struct that represents a chemical equation (e.g. 2H2 + O2 -> 2H2O)
///
/// Each side maps compounds to integer coefficients. A freshly parsed equation keeps the
/// coefficients written in the text (1 where none is written) until it is balanced.
/// # Example
/// ```
/// use chemeq::Equation;
///
/// let mut equation: Equation = "H2 + O2 -> H2O".parse().unwrap();
/// assert!(!equation.is_balanced());
///
/// equation.balance().unwrap();
/// assert_eq!(equation.to_string(), "2(H2) + O2 -> 2(H2O)");
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Equation {
    /// Reactants and their coefficients
    reactants: CoefficientMap,
    /// Products and their coefficients
    products: CoefficientMap,
}
impl Equation {
    /// Creates an equation from reactant and product coefficient maps
    pub fn new(reactants: CoefficientMap, products: CoefficientMap) -> Self {
        Self { reactants, products }
    }

    /// Creates an equation with every coefficient set to 1
    pub fn from_compounds(reactants: Vec<Compound>, products: Vec<Compound>) -> Self {
        Self::new(
            reactants.into_iter().map(|c| (c, 1)).collect(),
            products.into_iter().map(|c| (c, 1)).collect(),
        )
    }

    /// Creates an equation from compounds and matching coefficient lists
    /// # Returns
    /// * `Ok` - equation
    /// * `Err` - [`Error::TypeMismatch`] if a coefficient list does not match its compound list
    pub fn with_coefficients(
        reactants: Vec<Compound>,
        reactant_coefficients: &[i64],
        products: Vec<Compound>,
        product_coefficients: &[i64],
    ) -> Result<Self> {
        if reactants.len() != reactant_coefficients.len() || products.len() != product_coefficients.len() {
            return Err(Error::mismatch(format!(
                "{} reactants with {} coefficients and {} products with {} coefficients",
                reactants.len(),
                reactant_coefficients.len(),
                products.len(),
                product_coefficients.len()
            )));
        }
        Ok(Self::new(
            reactants.into_iter().zip(reactant_coefficients.iter().copied()).collect(),
            products.into_iter().zip(product_coefficients.iter().copied()).collect(),
        ))
    }

    /// Parses an equation such as `2H2 + O2 -> 2H2O` (`→` is accepted as well)
    /// Every term may start with an integer coefficient; it defaults to 1.
    /// # Arguments
    /// * `input` - equation text with exactly one arrow
    /// # Returns
    /// * `Ok` - equation
    /// * `Err` - [`Error::InvalidSyntax`] or [`Error::UnknownElement`]
    /// # Example
    /// ```
    /// use chemeq::{Compound, Equation};
    ///
    /// let equation = Equation::parse("2H2O2 → 2H2O + O2").unwrap();
    ///
    /// assert_eq!(equation.reactants().get(&Compound::parse("H2O2").unwrap()), 2);
    /// assert_eq!(equation.products().get(&Compound::parse("O2").unwrap()), 1);
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let arrow_count: usize = ARROWS.iter().map(|arrow| input.matches(arrow).count()).sum();
        if arrow_count != 1 {
            return Err(Error::syntax(format!(
                "expected exactly one \"->\" or \"→\" between reactants and products, found {arrow_count}"
            )));
        }
        let (reactants_str, products_str) = ARROWS
            .iter()
            .find_map(|arrow| input.split_once(arrow))
            .ok_or_else(|| Error::syntax("missing arrow"))?;

        Ok(Self::new(parse_side(reactants_str)?, parse_side(products_str)?))
    }

    /// Parses every equation in `inputs`
    pub fn parse_list(inputs: &[&str]) -> Result<Vec<Self>> {
        inputs.iter().map(|input| Self::parse(input)).collect()
    }

    /// Returns the reactants and their coefficients
    pub fn reactants(&self) -> &CoefficientMap {
        &self.reactants
    }

    /// Returns the products and their coefficients
    pub fn products(&self) -> &CoefficientMap {
        &self.products
    }

    /// Returns all coefficients, reactants first and then products
    pub fn coefficients(&self) -> Vec<i64> {
        self.reactants.coefficients().chain(self.products.coefficients()).collect()
    }

    /// Returns true if both sides are empty
    pub fn is_empty(&self) -> bool {
        self.reactants.is_empty() && self.products.is_empty()
    }

    /// Returns true if every element occurs equally often on both sides
    pub fn is_balanced(&self) -> bool {
        let reactants: Vec<Compound> = self.reactants.compounds().cloned().collect();
        let products: Vec<Compound> = self.products.compounds().cloned().collect();
        balance::is_balanced(&reactants, &products, &self.coefficients())
    }

    /// Returns `self` if balanced
    /// # Panics
    /// If the equation is not balanced
    pub fn assert_balanced(&self) -> &Self {
        assert!(self.is_balanced(), "the equation {self} is not balanced");
        self
    }

    /// Returns a balanced copy, with the smallest positive integer coefficients
    /// # Returns
    /// * `Ok` - balanced equation
    /// * `Err` - [`Error::Balancing`] if the reaction cannot be balanced
    pub fn balanced(&self) -> Result<Self> {
        let reactants: Vec<Compound> = self.reactants.compounds().cloned().collect();
        let products: Vec<Compound> = self.products.compounds().cloned().collect();

        let coefficients = balance::balance(&reactants, &products)?;
        let (reactant_coefficients, product_coefficients) = coefficients.split_at(reactants.len());

        Self::with_coefficients(reactants, reactant_coefficients, products, product_coefficients)
    }

    /// Balances the equation in place
    /// On failure the equation is left unchanged.
    /// # Example
    /// ```
    /// use chemeq::Equation;
    ///
    /// let mut equation = Equation::parse("Fe2(SO4)3 + KOH -> K2SO4 + Fe(OH)3").unwrap();
    /// equation.balance().unwrap();
    ///
    /// assert_eq!(equation.coefficients(), vec![1, 6, 3, 2]);
    /// ```
    pub fn balance(&mut self) -> Result<()> {
        *self = self.balanced()?;
        Ok(())
    }

    /// Returns a copy with every coefficient multiplied by `factor`
    /// A factor of 0 yields an empty equation.
    /// # Panics
    /// If a coefficient overflows `i64` (see [`checked_scaled`](Equation::checked_scaled))
    pub fn scaled(&self, factor: i64) -> Self {
        Self::new(self.reactants.scaled(factor), self.products.scaled(factor))
    }

    /// Returns a copy with every coefficient multiplied by `factor`
    /// # Returns
    /// * `Ok` - scaled equation
    /// * `Err` - [`Error::TypeMismatch`] if a coefficient overflows `i64`
    pub fn checked_scaled(&self, factor: i64) -> Result<Self> {
        match (self.reactants.checked_scaled(factor), self.products.checked_scaled(factor)) {
            (Some(reactants), Some(products)) => Ok(Self::new(reactants, products)),
            _ => Err(Error::mismatch(format!("scaling {self} by {factor} overflows a coefficient"))),
        }
    }

    /// Returns the sum of both equations
    /// # Returns
    /// * `Ok` - sum
    /// * `Err` - [`Error::TypeMismatch`] if a coefficient overflows `i64`
    pub fn checked_add(&self, other: &Equation) -> Result<Self> {
        match (
            self.reactants.checked_add(&other.reactants),
            self.products.checked_add(&other.products),
        ) {
            (Some(reactants), Some(products)) => Ok(Self::new(reactants, products)),
            _ => Err(Error::mismatch(format!("adding {self} and {other} overflows a coefficient"))),
        }
    }

    /// Multiplies every coefficient by `factor` in place
    pub fn scale(&mut self, factor: i64) {
        *self = self.scaled(factor);
    }

    /// Returns a copy with every coefficient divided by `divisor`
    /// # Returns
    /// * `Ok` - divided equation
    /// * `Err` - [`Error::TypeMismatch`] if `divisor` is 0, does not divide every coefficient,
    ///   or the quotient overflows `i64`
    pub fn divided(&self, divisor: i64) -> Result<Self> {
        if divisor == 0 || self.coefficients().iter().any(|c| c.checked_rem(divisor) != Some(0)) {
            return Err(Error::mismatch(format!(
                "dividing {self} by {divisor} does not give integer coefficients"
            )));
        }
        let divide = |side: &CoefficientMap| -> CoefficientMap {
            side.iter().map(|(compound, c)| (compound.clone(), c / divisor)).collect()
        };
        Ok(Self::new(divide(&self.reactants), divide(&self.products)))
    }

    /// Greatest common divisor of every coefficient on both sides (0 for an empty equation)
    fn common_factor(&self) -> i64 {
        let gcd = self
            .coefficients()
            .iter()
            .fold(0u64, |acc, c| acc.gcd(c.unsigned_abs()));
        i64::try_from(gcd).unwrap_or(1)
    }

    /// Returns a copy whose coefficients share no common factor
    /// # Example
    /// ```
    /// use chemeq::Equation;
    ///
    /// let equation = Equation::parse("2H2O -> 2H2 + 2O").unwrap();
    /// assert_eq!(equation.reduced().to_string(), "H2O -> H2 + O");
    /// ```
    pub fn reduced(&self) -> Self {
        match self.common_factor() {
            0 | 1 => self.clone(),
            factor => Self::new(
                self.reactants.iter().map(|(compound, c)| (compound.clone(), c / factor)).collect(),
                self.products.iter().map(|(compound, c)| (compound.clone(), c / factor)).collect(),
            ),
        }
    }

    /// Divides out the common factor of the coefficients in place
    pub fn reduce(&mut self) {
        *self = self.reduced();
    }

    /// Returns true if the coefficients share no common factor greater than 1
    pub fn is_reduced(&self) -> bool {
        self.common_factor() == 1
    }

    /// Returns `self` if reduced
    /// # Panics
    /// If the equation is not reduced
    pub fn assert_reduced(&self) -> &Self {
        assert!(self.is_reduced(), "the equation {self} is not reduced");
        self
    }

    /// Largest integer multiple of `compounds` contained in the products
    fn max_multiple_in_products(&self, compounds: &CoefficientMap) -> i64 {
        compounds
            .iter()
            .map(|(compound, c)| self.products.get(compound).div_euclid(c))
            .min()
            .unwrap_or(0)
            .max(0)
    }

    /// Returns the reaction obtained by feeding the products of `self` into `other`
    ///
    /// Compounds produced by `self` and consumed by `other` are intermediates. The combined
    /// reaction (reactants of `self` plus the non-intermediate reactants of `other`, products of
    /// `other` plus the non-intermediate products of `self`) is balanced from scratch. When that
    /// has no solution, the two reactions are added explicitly: `other` is applied as many times
    /// as the products of `self` allow and the consumed intermediates are cancelled.
    ///
    /// Both equations must have positive coefficients only; an equation produced by
    /// negation or subtraction is rejected with [`Error::TypeMismatch`].
    /// # Example
    /// ```
    /// use chemeq::Equation;
    ///
    /// let decomposition = Equation::parse("H2O2 -> H2 + O2").unwrap();
    /// let dissociation = Equation::parse("O2 -> 2(O)").unwrap();
    ///
    /// let combined = decomposition.extended(&dissociation).unwrap();
    /// assert_eq!(combined.to_string(), "H2O2 -> H2 + 2(O)");
    /// ```
    pub fn extended(&self, other: &Equation) -> Result<Self> {
        for equation in [self, other] {
            if equation.coefficients().iter().any(|&c| c <= 0) {
                return Err(Error::mismatch(format!(
                    "cannot extend with {equation}: coefficients must be positive"
                )));
            }
        }

        let intermediates: HashSet<&Compound> = self
            .products
            .compounds()
            .filter(|compound| other.reactants.contains(compound))
            .collect();

        let reactants: Vec<Compound> = self
            .reactants
            .compounds()
            .chain(other.reactants.compounds().filter(|c| !intermediates.contains(c)))
            .cloned()
            .collect();
        let products: Vec<Compound> = self
            .products
            .compounds()
            .filter(|c| !intermediates.contains(c))
            .chain(other.products.compounds())
            .cloned()
            .collect();

        match Self::from_compounds(reactants, products).balanced() {
            Ok(equation) => {
                debug!(%equation, "extension balanced directly");
                return Ok(equation);
            }
            Err(Error::Balancing(err)) => {
                debug!(error = %err, "extension does not balance directly, combining reactions");
            }
            Err(err) => return Err(err),
        }

        let multiple = self.max_multiple_in_products(&other.reactants);
        let consumed = &other.reactants * multiple;
        let missing_reactants = (&other.reactants - &consumed).max_with(0);

        let reactants = &self.reactants + &missing_reactants;
        let products = if consumed.is_empty() {
            &self.products + &(&other.products * (multiple + 1))
        } else {
            &(&self.products + &(&other.products * multiple)) - &consumed
        };

        let equation = Self::new(reactants, products);
        if self.is_balanced() && other.is_balanced() {
            assert!(
                equation.is_balanced(),
                "extending {self} by {other} produced the unbalanced {equation}"
            );
        }
        Ok(equation.reduced())
    }

    /// Extends the equation in place (see [`extended`](Equation::extended))
    /// On failure the equation is left unchanged.
    pub fn extend(&mut self, other: &Equation) -> Result<()> {
        *self = self.extended(other)?;
        Ok(())
    }

    /// Extends by each equation of `others` in turn, left to right
    /// # Example
    /// ```
    /// use chemeq::Equation;
    ///
    /// let steps = Equation::parse_list(&["CO2 + C -> 2(CO)", "2(CO) + O2 -> 2(CO2)"]).unwrap();
    /// let start = Equation::parse("C + O2 -> CO2").unwrap();
    ///
    /// let combined = start.extended_all(&steps).unwrap();
    /// assert!(combined.is_balanced());
    /// ```
    pub fn extended_all(&self, others: &[Equation]) -> Result<Self> {
        let mut current = self.clone();
        for other in others {
            current = current.extended(other)?;
        }
        Ok(current)
    }

    /// Extends in place by each equation of `others` in turn
    /// On failure the equation is left unchanged.
    pub fn extend_all(&mut self, others: &[Equation]) -> Result<()> {
        *self = self.extended_all(others)?;
        Ok(())
    }
}

/// Parses one side of an equation: terms separated by `+`, each with an optional leading coefficient
fn parse_side(side: &str) -> Result<CoefficientMap> {
    let mut compounds = CoefficientMap::new();
    for term in side.split('+') {
        let term: String = term.chars().filter(|c| !c.is_whitespace()).collect();
        match tokenize(&term)?.first() {
            Some(Token::Count(coefficient)) => {
                let formula = term.trim_start_matches(|c: char| c.is_ascii_digit());
                compounds.add_to(Compound::parse(formula)?, i64::from(*coefficient));
            }
            Some(_) => compounds.add_to(Compound::parse(&term)?, 1),
            None => return Err(Error::syntax(format!("empty term in \"{}\"", side.trim()))),
        }
    }
    Ok(compounds)
}

impl Display for Equation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let side = |compounds: &CoefficientMap| {
            compounds
                .iter()
                .map(|(compound, c)| {
                    if c == 1 {
                        compound.to_string()
                    } else {
                        format!("{c}({compound})")
                    }
                })
                .collect::<Vec<_>>()
                .join(" + ")
        };
        write!(f, "{} -> {}", side(&self.reactants), side(&self.products))
    }
}

impl FromStr for Equation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Add<&Equation> for &Equation {
    type Output = Equation;

    fn add(self, rhs: &Equation) -> Equation {
        Equation::new(&self.reactants + &rhs.reactants, &self.products + &rhs.products)
    }
}

impl Add for Equation {
    type Output = Equation;

    fn add(self, rhs: Equation) -> Equation {
        &self + &rhs
    }
}

impl Sub<&Equation> for &Equation {
    type Output = Equation;

    fn sub(self, rhs: &Equation) -> Equation {
        self + &(rhs * -1)
    }
}

impl Sub for Equation {
    type Output = Equation;

    fn sub(self, rhs: Equation) -> Equation {
        &self - &rhs
    }
}

impl Neg for &Equation {
    type Output = Equation;

    fn neg(self) -> Equation {
        self.scaled(-1)
    }
}

impl Neg for Equation {
    type Output = Equation;

    fn neg(self) -> Equation {
        self.scaled(-1)
    }
}

impl Mul<i64> for &Equation {
    type Output = Equation;

    fn mul(self, rhs: i64) -> Equation {
        self.scaled(rhs)
    }
}

impl Mul<i64> for Equation {
    type Output = Equation;

    fn mul(self, rhs: i64) -> Equation {
        self.scaled(rhs)
    }
}

impl Mul<&Equation> for i64 {
    type Output = Equation;

    fn mul(self, rhs: &Equation) -> Equation {
        rhs.scaled(self)
    }
}
