//! Recursive reduction of formula tokens into an element multiset.

use crate::composition::Composition;
use crate::error::{Error, Result};
use crate::token::{Delimiter, Token};

/// Finds the index of the delimiter closing a group
/// Only delimiters of the same family change the depth; other families are skipped.
/// # Arguments
/// * `tokens` - token sequence
/// * `start` - index of the first token inside the group
/// * `delimiter` - family of the opening delimiter
/// # Returns
/// * `Ok` - index of the matching closing delimiter
/// * `Err` - [`Error::InvalidSyntax`] if the group is never closed
pub fn closing_index(tokens: &[Token], start: usize, delimiter: Delimiter) -> Result<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(start) {
        match token {
            Token::Open(d) if *d == delimiter => depth += 1,
            Token::Close(d) if *d == delimiter => {
                if depth == 0 {
                    return Ok(i);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    Err(Error::syntax(format!(
        "'{}' opened at token {} was never closed",
        delimiter.open(),
        start.saturating_sub(1)
    )))
}

/// Reduces tokens into element counts, multiplying grouped counts by the number that follows the group
/// # Arguments
/// * `tokens` - tokens produced by [`tokenize`](crate::token::tokenize)
/// # Returns
/// * `Ok` - element multiset
/// * `Err` - [`Error::InvalidSyntax`] for empty input, a leading count, or broken nesting
/// # Example
/// ```
/// use chemeq::element::Element;
/// use chemeq::resolve::resolve;
/// use chemeq::token::tokenize;
///
/// let composition = resolve(&tokenize("(NH4)2SO4").unwrap()).unwrap();
/// assert_eq!(composition.get(Element::N), 2);
/// assert_eq!(composition.get(Element::H), 8);
/// assert_eq!(composition.get(Element::S), 1);
/// assert_eq!(composition.get(Element::O), 4);
/// ```
pub fn resolve(tokens: &[Token]) -> Result<Composition> {
    match tokens.first() {
        None => return Err(Error::syntax("empty formula")),
        Some(Token::Count(n)) => return Err(Error::syntax(format!("formula cannot start with the count {n}"))),
        Some(_) => {}
    }

    let overflow = || Error::syntax("element count is too large");

    let mut total = Composition::new();
    let mut i = 0;
    while i < tokens.len() {
        match tokens[i] {
            Token::Open(delimiter) => {
                let close = closing_index(tokens, i + 1, delimiter)?;
                let inner = resolve(&tokens[i + 1..close])?;
                match tokens.get(close + 1) {
                    Some(Token::Count(n)) => {
                        total.merge(&inner.scaled(*n).ok_or_else(overflow)?).ok_or_else(overflow)?;
                        i = close + 2;
                    }
                    _ => {
                        total.merge(&inner).ok_or_else(overflow)?;
                        i = close + 1;
                    }
                }
            }
            Token::Close(delimiter) => {
                return Err(Error::syntax(format!("unmatched '{}'", delimiter.close())));
            }
            Token::Element(element) => match tokens.get(i + 1) {
                Some(Token::Count(n)) => {
                    total.add(element, *n).ok_or_else(overflow)?;
                    i += 2;
                }
                _ => {
                    total.add(element, 1).ok_or_else(overflow)?;
                    i += 1;
                }
            },
            Token::Count(n) => {
                return Err(Error::syntax(format!("count {n} is not bound to an element or group")));
            }
        }
    }

    Ok(total)
}
