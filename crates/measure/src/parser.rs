//! Free-form imperial length parser.
//!
//! Input is normalized, split into tokens and read by a small recursive-descent
//! grammar:
//!
//! ```text
//! input    := marked | bare
//! group    := NUMBER [ "/" NUMBER ] [ MARK ]
//! marked   := [ NUMBER "'" ] [ NUMBER ["\""] ] [ NUMBER "/" NUMBER ["\""] ]   (at least one mark)
//! bare     := N            -> feet
//!           | A/B          -> inches
//!           | N N          -> feet, inches
//!           | N N A/B      -> feet, inches, fraction of an inch
//!           | N A/B        -> feet, A/B read as inches
//! ```
//!
//! In the marked form an unmarked middle number counts as inches only when a
//! foot group precedes it or a fraction follows it.
//!
//! Numbers too large to represent are rejected rather than read as zero.

use crate::error::{MeasureError, MeasureResult};
use crate::measurement::{DecimalFeet, INCHES_PER_FOOT};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Slash,
    Mark(Mark),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Foot,
    Inch,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Quantity {
    Number(f64),
    /// Already divided out; denominators of zero are rejected while parsing.
    Fraction(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Group {
    quantity: Quantity,
    mark: Option<Mark>,
}

/// Parse a human-entered length into decimal feet.
///
/// Empty input (after trimming) is zero. Anything that matches no notation is
/// an [`MeasureError::UnrecognizedFormat`] carrying `text`.
pub fn parse_free_form(text: &str) -> MeasureResult<DecimalFeet> {
    let normalized = normalize(text);
    let tokens = tokenize(&normalized, text)?;
    let groups = Parser::new(&tokens, text).groups()?;

    if groups.is_empty() {
        return Ok(DecimalFeet::ZERO);
    }

    let (feet, inches) = if groups.iter().any(|g| g.mark.is_some()) {
        marked(&groups, text)?
    } else {
        bare(&groups, text)?
    };

    let total = feet + inches / f64::from(INCHES_PER_FOOT);
    if !total.is_finite() {
        return Err(MeasureError::unrecognized(text));
    }
    Ok(DecimalFeet::new(total))
}

/// Lowercase and fold quote variants onto `'` and `"`.
fn normalize(text: &str) -> String {
    let folded: String = text
        .trim()
        .chars()
        .map(|c| match c {
            '\u{2019}' | '\u{2018}' | '\u{2032}' | '\u{00b4}' | '`' => '\'',
            '\u{201d}' | '\u{201c}' | '\u{2033}' => '"',
            c => c,
        })
        .collect::<String>()
        .to_lowercase();
    folded.replace("''", "\"")
}

fn word_mark(word: &str) -> Option<Mark> {
    match word {
        "ft" | "foot" | "feet" | "pied" | "pieds" => Some(Mark::Foot),
        "in" | "inch" | "inches" | "pouce" | "pouces" => Some(Mark::Inch),
        _ => None,
    }
}

fn tokenize(normalized: &str, original: &str) -> MeasureResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = normalized.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c.is_ascii_digit() || c == '.' {
            let mut end = start;
            let mut seen_dot = false;
            while let Some(&(i, d)) = chars.peek() {
                if d.is_ascii_digit() || (d == '.' && !seen_dot) {
                    seen_dot |= d == '.';
                    end = i + d.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            if matches!(chars.peek(), Some(&(_, '.'))) {
                return Err(MeasureError::unrecognized(original));
            }
            let value: f64 = normalized[start..end]
                .parse()
                .map_err(|_| MeasureError::unrecognized(original))?;
            if !value.is_finite() {
                return Err(MeasureError::unrecognized(original));
            }
            tokens.push(Token::Number(value));
        } else if c == '/' {
            chars.next();
            tokens.push(Token::Slash);
        } else if c == '\'' {
            chars.next();
            tokens.push(Token::Mark(Mark::Foot));
        } else if c == '"' {
            chars.next();
            tokens.push(Token::Mark(Mark::Inch));
        } else if c.is_alphabetic() {
            let mut end = start;
            while let Some(&(i, w)) = chars.peek() {
                if w.is_alphabetic() {
                    end = i + w.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            let mark = word_mark(&normalized[start..end])
                .ok_or_else(|| MeasureError::unrecognized(original))?;
            tokens.push(Token::Mark(mark));
        } else {
            return Err(MeasureError::unrecognized(original));
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    original: &'a str,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], original: &'a str) -> Self {
        Self {
            tokens,
            pos: 0,
            original,
        }
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.peek();
        self.pos += 1;
        token
    }

    fn groups(mut self) -> MeasureResult<Vec<Group>> {
        let mut groups = Vec::new();
        while self.peek().is_some() {
            groups.push(self.group()?);
        }
        Ok(groups)
    }

    fn group(&mut self) -> MeasureResult<Group> {
        let first = self.number()?;
        let quantity = if self.peek() == Some(Token::Slash) {
            self.bump();
            let denominator = self.number()?;
            if denominator == 0.0 {
                return Err(MeasureError::zero_denominator(self.original));
            }
            Quantity::Fraction(first / denominator)
        } else {
            Quantity::Number(first)
        };

        let mark = match self.peek() {
            Some(Token::Mark(mark)) => {
                self.bump();
                Some(mark)
            }
            _ => None,
        };

        Ok(Group { quantity, mark })
    }

    fn number(&mut self) -> MeasureResult<f64> {
        match self.bump() {
            Some(Token::Number(n)) => Ok(n),
            _ => Err(MeasureError::unrecognized(self.original)),
        }
    }
}

/// Returns (feet, inches).
fn marked(groups: &[Group], original: &str) -> MeasureResult<(f64, f64)> {
    let mut feet = 0.0;
    let mut inches = 0.0;
    let mut i = 0;

    let has_feet = match groups.first() {
        Some(Group {
            quantity: Quantity::Number(n),
            mark: Some(Mark::Foot),
        }) => {
            feet = *n;
            i += 1;
            true
        }
        _ => false,
    };

    if let Some(Group {
        quantity: Quantity::Number(n),
        mark,
    }) = groups.get(i)
    {
        let fraction_follows = matches!(
            groups.get(i + 1),
            Some(Group {
                quantity: Quantity::Fraction(_),
                ..
            })
        );
        let accepted = match mark {
            Some(Mark::Inch) => true,
            None => has_feet || fraction_follows,
            Some(Mark::Foot) => false,
        };
        if accepted {
            inches += n;
            i += 1;
        }
    }

    if let Some(Group {
        quantity: Quantity::Fraction(f),
        mark: None | Some(Mark::Inch),
    }) = groups.get(i)
    {
        inches += f;
        i += 1;
    }

    if i != groups.len() {
        return Err(MeasureError::unrecognized(original));
    }
    Ok((feet, inches))
}

/// Returns (feet, inches).
fn bare(groups: &[Group], original: &str) -> MeasureResult<(f64, f64)> {
    let quantities: Vec<Quantity> = groups.iter().map(|g| g.quantity).collect();
    match quantities.as_slice() {
        [Quantity::Number(n)] => Ok((*n, 0.0)),
        [Quantity::Fraction(f)] => Ok((0.0, *f)),
        [Quantity::Number(feet), Quantity::Number(inches)] => Ok((*feet, *inches)),
        [
            Quantity::Number(feet),
            Quantity::Number(inches),
            Quantity::Fraction(f),
        ] => Ok((*feet, inches + f)),
        // A fraction right after the feet is read as inches, not a fraction of a foot.
        [Quantity::Number(feet), Quantity::Fraction(inches)] => Ok((*feet, *inches)),
        _ => Err(MeasureError::unrecognized(original)),
    }
}
