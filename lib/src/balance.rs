//! Stoichiometric balancing via the exact null space of the composition matrix.

use crate::compound::Compound;
use crate::element::N_ELEMENTS;
use crate::error::{BalancingError, Result};
use malachite::num::arithmetic::traits::{Abs, Gcd, Lcm};
use malachite::num::basic::traits::{One, Zero};
use malachite::{Natural, Rational};
use std::cmp::{max, min};
use std::mem;
use tracing::{debug, trace};

/// Computes the smallest positive integer coefficients that balance a reaction
/// # Arguments
/// * `reactants` - reactant compounds in equation order
/// * `products` - product compounds in equation order
/// # Returns
/// * `Ok` - coefficients, reactants first and then products, in input order
/// * `Err` - [`BalancingError`] if no physically valid solution exists
/// # Example
/// ```
/// use chemeq::{balance, Compound};
///
/// let reactants = Compound::parse_list(&["CH4", "O2"]).unwrap();
/// let products = Compound::parse_list(&["CO2", "H2O"]).unwrap();
///
/// assert_eq!(balance(&reactants, &products).unwrap(), vec![1, 2, 1, 2]);
/// ```
pub fn balance(reactants: &[Compound], products: &[Compound]) -> Result<Vec<i64>> {
    if reactants.is_empty() || products.is_empty() {
        return Err(BalancingError::new("an equation needs at least one reactant and one product", Vec::new()).into());
    }

    let mut matrix = stoichiometric_matrix(reactants, products);
    debug!(
        rows = matrix.len(),
        reactants = reactants.len(),
        products = products.len(),
        "built stoichiometric matrix"
    );

    let kernel = null_space(&mut matrix, reactants.len() + products.len());
    debug!(dimension = kernel.len(), "computed kernel");

    let ratios = match select_solution(&kernel) {
        Some(ratios) => ratios,
        None => {
            return Err(BalancingError::new(
                "no kernel vector with consistent signs; the reaction cannot be balanced",
                kernel,
            )
            .into())
        }
    };

    let ratios = minimal_ratios(&ratios);

    // ratios are exact, so a fractional entry means a solver defect
    if ratios.iter().any(|r| r.denominator_ref() != &Natural::ONE) {
        return Err(BalancingError::new("solution ratios are not integers", kernel)
            .with_ratios(ratios)
            .into());
    }

    let mut solution = Vec::with_capacity(ratios.len());
    for r in ratios.iter() {
        match i64::try_from(r) {
            Ok(x) => solution.push(x),
            Err(_) => {
                return Err(BalancingError::new("coefficient is too large", kernel)
                    .with_ratios(ratios.clone())
                    .with_solution(solution)
                    .into())
            }
        }
    }
    debug!(?solution, "balanced");

    assert!(
        is_balanced(reactants, products, &solution),
        "coefficients {solution:?} do not balance the reaction"
    );

    Ok(solution)
}

/// Checks that the coefficient-weighted reactant and product composition vectors are equal
/// # Arguments
/// * `reactants` - reactant compounds
/// * `products` - product compounds
/// * `coefficients` - reactant coefficients followed by product coefficients
pub fn is_balanced(reactants: &[Compound], products: &[Compound], coefficients: &[i64]) -> bool {
    if coefficients.len() != reactants.len() + products.len() {
        return false;
    }
    let (reactant_coefficients, product_coefficients) = coefficients.split_at(reactants.len());

    let weighted_sum = |compounds: &[Compound], coefficients: &[i64]| {
        let mut total = vec![0i128; N_ELEMENTS];
        for (compound, &c) in compounds.iter().zip(coefficients) {
            for (t, &v) in total.iter_mut().zip(compound.vector()) {
                *t += i128::from(c) * i128::from(v);
            }
        }
        total
    };

    weighted_sum(reactants, reactant_coefficients) == weighted_sum(products, product_coefficients)
}

/// Builds the matrix whose columns are reactant vectors followed by negated product vectors
/// Rows of elements absent from every compound are left out; they do not constrain the kernel.
fn stoichiometric_matrix(reactants: &[Compound], products: &[Compound]) -> Vec<Vec<Rational>> {
    let columns: Vec<(&Compound, i64)> = reactants
        .iter()
        .map(|c| (c, 1))
        .chain(products.iter().map(|c| (c, -1)))
        .collect();

    (0..N_ELEMENTS)
        .filter(|&row| columns.iter().any(|(c, _)| c.vector()[row] != 0))
        .map(|row| {
            columns
                .iter()
                .map(|(c, sign)| Rational::from(c.vector()[row] * sign))
                .collect()
        })
        .collect()
}

/// Computes a basis of the null space of `matrix` (which is reduced in place)
/// One basis vector per free column: 1 at the free column, minus the reduced entries at the pivots.
/// # Arguments
/// * `matrix` - m x n matrix
/// * `n` - number of columns
pub fn null_space(matrix: &mut [Vec<Rational>], n: usize) -> Vec<Vec<Rational>> {
    let pivots = reduced_row_echelon(matrix, n);
    trace!(?matrix, ?pivots, "reduced row echelon form");

    (0..n)
        .filter(|col| !pivots.contains(col))
        .map(|free| {
            let mut vector = vec![Rational::ZERO; n];
            vector[free] = Rational::ONE;
            for (row, &pivot) in pivots.iter().enumerate() {
                vector[pivot] = -&matrix[row][free];
            }
            vector
        })
        .collect()
}

/// Reduces a matrix to reduced row echelon form using Gaussian elimination with partial pivoting
/// # Arguments
/// * `matrix` - m x n matrix
/// * `n` - number of columns
/// # Returns
/// * pivot column of each nonzero row, in row order
/// # Example
/// ```
/// use chemeq::balance::reduced_row_echelon;
/// use malachite::Rational;
///
/// let mut matrix = vec![
///     vec![Rational::from(2), Rational::from(4)],
///     vec![Rational::from(1), Rational::from(2)],
/// ];
///
/// let pivots = reduced_row_echelon(&mut matrix, 2);
///
/// assert_eq!(pivots, vec![0]);
/// assert_eq!(matrix, vec![
///     vec![Rational::from(1), Rational::from(2)],
///     vec![Rational::from(0), Rational::from(0)],
/// ]);
/// ```
pub fn reduced_row_echelon(matrix: &mut [Vec<Rational>], n: usize) -> Vec<usize> {
    let m = matrix.len();
    let mut pivots = Vec::new();
    let mut row = 0;
    for col in 0..n {
        if row == m {
            break;
        }

        // pick the largest entry in the column as pivot
        let mut i_max = row;
        for (i, row_n) in matrix.iter().enumerate().skip(row + 1) {
            if (&row_n[col]).abs() > (&matrix[i_max][col]).abs() {
                i_max = i;
            }
        }
        if matrix[i_max][col] == Rational::ZERO {
            continue;
        }
        swap_rows(row, i_max, matrix);

        // scale pivot row so that the pivot is 1
        let pivot = matrix[row][col].clone();
        for j in col..n {
            let value = &matrix[row][j] / &pivot;
            matrix[row][j] = value;
        }

        // eliminate the column everywhere else (above and below)
        for i in 0..m {
            if i == row || matrix[i][col] == Rational::ZERO {
                continue;
            }
            let factor = matrix[i][col].clone();
            for j in col..n {
                let sub_amount = &factor * &matrix[row][j];
                matrix[i][j] -= sub_amount;
            }
        }

        pivots.push(col);
        row += 1;
    }
    pivots
}

/// Swaps two rows in a matrix
/// # Arguments
/// * `r1` - index of the first row
/// * `r2` - index of the second row
/// * `matrix` - matrix
#[inline(always)]
fn swap_rows<T>(r1: usize, r2: usize, matrix: &mut [Vec<T>]) {
    if r1 != r2 {
        let bigger_r = max(r1, r2);
        let smaller_r = min(r1, r2);
        let (top, bot) = matrix.split_at_mut(bigger_r); // splits before bigger_r so index 0 in bot will be bigger_r
        mem::swap(&mut top[smaller_r], &mut bot[0])
    }
}

/// Returns `vector` negated if needed so that its nonzero entries are positive,
/// or `None` if its nonzero entries have mixed signs
fn sign_normalized(vector: &[Rational]) -> Option<Vec<Rational>> {
    let positive = vector.iter().any(|x| *x > Rational::ZERO);
    let negative = vector.iter().any(|x| *x < Rational::ZERO);
    match (positive, negative) {
        (true, false) => Some(vector.to_vec()),
        (false, true) => Some(vector.iter().map(|x| -x).collect()),
        _ => None,
    }
}

/// Picks the physically meaningful kernel vector
/// The first basis vector with every entry nonzero and of one sign is preferred. Failing that,
/// if every basis vector is sign-consistent, their sign-normalized sum is used when all of its
/// entries are positive (this covers compounds that appear on both sides). Otherwise small
/// integer combinations of the basis are searched, see [`positive_combination`].
fn select_solution(kernel: &[Vec<Rational>]) -> Option<Vec<Rational>> {
    let normalized: Vec<Option<Vec<Rational>>> = kernel.iter().map(|v| sign_normalized(v)).collect();

    if let Some(vector) = normalized
        .iter()
        .flatten()
        .find(|v| v.iter().all(|x| *x != Rational::ZERO))
    {
        return Some(vector.clone());
    }

    if !normalized.is_empty() && normalized.iter().all(Option::is_some) {
        let n = kernel[0].len();
        let mut sum = vec![Rational::ZERO; n];
        for vector in normalized.iter().flatten() {
            for (s, x) in sum.iter_mut().zip(vector) {
                *s += x;
            }
        }
        debug!("combined {} sign-consistent kernel vectors", kernel.len());

        if sum.iter().all(|x| *x > Rational::ZERO) {
            return Some(sum);
        }
    }

    positive_combination(kernel)
}

/// Largest absolute weight given to a basis vector by [`positive_combination`]
const COMBINATION_WEIGHT: i64 = 4;

/// Kernels with more basis vectors than this are not searched
const COMBINATION_DIMENSION: usize = 4;

/// Searches combinations of the basis vectors with integer weights in
/// `-COMBINATION_WEIGHT..=COMBINATION_WEIGHT` for a vector with every entry positive
///
/// A row-reduced basis can mix signs even when a positive solution exists (e.g.
/// `H2 + O2 + H2O2 -> H2O`). Among the positive combinations found, the one whose minimal
/// integer ratios have the smallest sum wins; ties go to the first weight vector enumerated.
/// The search is bounded, so a positive solution needing larger weights or a kernel of more
/// than `COMBINATION_DIMENSION` vectors is not found.
fn positive_combination(kernel: &[Vec<Rational>]) -> Option<Vec<Rational>> {
    if kernel.len() < 2 || kernel.len() > COMBINATION_DIMENSION {
        return None;
    }

    let n = kernel[0].len();
    let span = 2 * COMBINATION_WEIGHT + 1;
    let total = (0..kernel.len()).fold(1i64, |acc, _| acc * span);

    let mut best: Option<(Rational, Vec<Rational>)> = None;
    for index in 0..total {
        let mut rest = index;
        let mut combination = vec![Rational::ZERO; n];
        for vector in kernel {
            let weight = Rational::from(rest % span - COMBINATION_WEIGHT);
            rest /= span;
            if weight == Rational::ZERO {
                continue;
            }
            for (c, x) in combination.iter_mut().zip(vector) {
                *c += &weight * x;
            }
        }
        if !combination.iter().all(|x| *x > Rational::ZERO) {
            continue;
        }

        let ratios = minimal_ratios(&combination);
        let size = ratios.iter().fold(Rational::ZERO, |acc, r| acc + r);
        if best.as_ref().map_or(true, |(smallest, _)| size < *smallest) {
            best = Some((size, ratios));
        }
    }

    if let Some((size, _)) = &best {
        debug!(%size, "found positive combination of kernel vectors");
    }
    best.map(|(_, ratios)| ratios)
}

/// Scales a non-negative ratio vector to the smallest integers with the same ratios
/// Multiplies by the least common multiple of the denominators, then divides by the
/// greatest common divisor of the numerators.
fn minimal_ratios(ratios: &[Rational]) -> Vec<Rational> {
    let mut lcm = Natural::ONE;
    for r in ratios.iter() {
        lcm = lcm.lcm(r.denominator_ref());
    }
    let lcm = Rational::from(&lcm);
    let scaled: Vec<Rational> = ratios.iter().map(|r| r * &lcm).collect();

    let mut gcd = Natural::ZERO;
    for r in scaled.iter() {
        gcd = gcd.gcd(r.numerator_ref());
    }
    if gcd == Natural::ZERO {
        return scaled;
    }
    let gcd = Rational::from(&gcd);
    scaled.iter().map(|r| r / &gcd).collect()
}
