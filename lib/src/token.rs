//! Formula tokenizer.

use crate::element::{self, Element};
use crate::error::{Error, Result};

/// One of the three recognized grouping delimiter families
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Delimiter {
    /// `(` and `)`
    Paren,
    /// `[` and `]`
    Bracket,
    /// `{` and `}`
    Brace,
}
impl Delimiter {
    /// Returns the delimiter family opened by `c`
    pub fn opened_by(c: char) -> Option<Self> {
        match c {
            '(' => Some(Delimiter::Paren),
            '[' => Some(Delimiter::Bracket),
            '{' => Some(Delimiter::Brace),
            _ => None,
        }
    }

    /// Returns the delimiter family closed by `c`
    pub fn closed_by(c: char) -> Option<Self> {
        match c {
            ')' => Some(Delimiter::Paren),
            ']' => Some(Delimiter::Bracket),
            '}' => Some(Delimiter::Brace),
            _ => None,
        }
    }

    /// Opening character
    pub fn open(self) -> char {
        match self {
            Delimiter::Paren => '(',
            Delimiter::Bracket => '[',
            Delimiter::Brace => '{',
        }
    }

    /// Closing character
    pub fn close(self) -> char {
        match self {
            Delimiter::Paren => ')',
            Delimiter::Bracket => ']',
            Delimiter::Brace => '}',
        }
    }
}

/// Lexical unit of a formula
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Token {
    /// Element symbol
    Element(Element),
    /// Opening delimiter
    Open(Delimiter),
    /// Closing delimiter
    Close(Delimiter),
    /// Multiplier bound to the preceding token (or a leading equation coefficient)
    Count(u32),
}

/// Splits a formula into tokens
/// Whitespace is ignored. The whole input is validated for illegal characters
/// and for equal numbers of opening and closing delimiters before scanning.
/// # Arguments
/// * `text` - formula, e.g. `(NH4)2SO4`
/// # Returns
/// * `Ok` - tokens in input order
/// * `Err` - [`Error::InvalidSyntax`] or [`Error::UnknownElement`]
/// # Example
/// ```
/// use chemeq::element::Element;
/// use chemeq::token::{tokenize, Delimiter, Token};
///
/// let tokens = tokenize("Fe(OH)3").unwrap();
/// assert_eq!(tokens, vec![
///     Token::Element(Element::Fe),
///     Token::Open(Delimiter::Paren),
///     Token::Element(Element::O),
///     Token::Element(Element::H),
///     Token::Close(Delimiter::Paren),
///     Token::Count(3),
/// ]);
/// ```
pub fn tokenize(text: &str) -> Result<Vec<Token>> {
    let letters: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    let formula: String = letters.iter().collect();

    if let Some(c) = letters.iter().find(|&&c| {
        !c.is_ascii_alphanumeric() && Delimiter::opened_by(c).is_none() && Delimiter::closed_by(c).is_none()
    }) {
        return Err(Error::syntax(format!("invalid character '{c}' in \"{formula}\"")));
    }

    let opening = letters.iter().filter(|&&c| Delimiter::opened_by(c).is_some()).count();
    let closing = letters.iter().filter(|&&c| Delimiter::closed_by(c).is_some()).count();
    if opening != closing {
        return Err(Error::syntax(format!(
            "unequal opening ({opening}) and closing ({closing}) delimiters in \"{formula}\""
        )));
    }

    let mut tokens = Vec::new();
    let mut i = 0;
    while i < letters.len() {
        let c = letters[i];
        match c {
            '0'..='9' => {
                let start = i;
                while i < letters.len() && letters[i].is_ascii_digit() {
                    i += 1;
                }
                let digits: String = letters[start..i].iter().collect();
                let count = digits
                    .parse::<u32>()
                    .map_err(|_| Error::syntax(format!("count {digits} is too large in \"{formula}\"")))?;
                if count == 0 {
                    return Err(Error::syntax(format!("zero count in \"{formula}\"")));
                }
                tokens.push(Token::Count(count));
            }
            'A'..='Z' => {
                let start = i;
                i += 1;
                while i < letters.len() && letters[i].is_ascii_lowercase() {
                    i += 1;
                }
                let symbol: String = letters[start..i].iter().collect();
                tokens.push(Token::Element(element::lookup(&symbol)?));
            }
            'a'..='z' => {
                // lowercase letters are only valid as the tail of a symbol
                return Err(Error::syntax(format!(
                    "lowercase '{c}' without a preceding uppercase letter in \"{formula}\""
                )));
            }
            _ => {
                if let Some(delimiter) = Delimiter::opened_by(c) {
                    tokens.push(Token::Open(delimiter));
                } else if let Some(delimiter) = Delimiter::closed_by(c) {
                    tokens.push(Token::Close(delimiter));
                }
                i += 1;
            }
        }
    }

    Ok(tokens)
}
