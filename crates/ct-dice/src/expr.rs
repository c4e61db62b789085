//! Dice expressions such as `3d6v1 + 2` or `2*(1d8+3)`.
//!
//! Dice terms are written `[count]d<sides>[v<drop>]`, where `v` drops the
//! lowest results. Terms combine with integers, `+ - * /` and parentheses.
//! Division is integer division.

use std::fmt;
use std::ops::Range;

use logos::Logos;
use rand::rngs::StdRng;
use tracing::debug;

use crate::error::{DiceError, DiceResult};
use crate::pouch::{DicePouch, MAX_DICE, validate};

/// Deepest nesting of parentheses and unary signs accepted.
pub const MAX_NESTING: usize = 64;

/// Token of a dice expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Dice {
        count: u64,
        sides: u64,
        drop: Option<u64>,
    },
    Number(i64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Dice { count, sides, drop } => {
                write!(f, "{count}d{sides}")?;
                if let Some(n) = drop {
                    write!(f, "v{n}")?;
                }
                Ok(())
            }
            Token::Number(n) => write!(f, "{n}"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    #[regex(r"[0-9]*[dD][0-9]+([vV][0-9]+)?")]
    Dice,

    #[regex(r"[0-9]+")]
    Number,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,
}

/// A rolled and evaluated dice expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionRoll {
    /// The expression as written.
    pub expression: String,
    /// The expression with every dice term replaced by its results.
    pub pretty: String,
    /// The evaluated total.
    pub total: i64,
    /// One pouch per dice term, in order of appearance.
    pub pouches: Vec<DicePouch>,
}

impl fmt::Display for ExpressionRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.pretty, self.total)
    }
}

/// Roll every dice term in `expression` and evaluate the result.
pub fn roll_expression(expression: &str, rng: &mut StdRng) -> DiceResult<ExpressionRoll> {
    let source = expression.trim();
    if source.is_empty() {
        return Err(DiceError::NoDice);
    }

    let tokens = lex(source)?;
    let mut values = Vec::with_capacity(tokens.len());
    let mut pouches = Vec::new();
    let mut pretty = String::with_capacity(source.len());
    let mut last = 0;

    for (token, span) in tokens {
        let Token::Dice { count, sides, drop } = token else {
            values.push(token);
            continue;
        };
        validate(count, sides)?;
        let count = u32::try_from(count).map_err(|_| DiceError::TooManyDice {
            requested: count,
            max: MAX_DICE,
        })?;
        let sides = u32::try_from(sides)
            .map_err(|_| DiceError::syntax(source, format!("d{sides} has too many sides")))?;
        let mut pouch = DicePouch::roll(count, sides, 0, rng)?;
        if let Some(n) = drop {
            pouch.drop_lowest(u32::try_from(n).unwrap_or(u32::MAX));
        }

        pretty.push_str(&source[last..span.start]);
        pretty.push_str(&pouch.pretty_string());
        last = span.end;
        values.push(Token::Number(pouch.sum()));
        pouches.push(pouch);
    }
    pretty.push_str(&source[last..]);

    let mut eval = Evaluator {
        tokens: &values,
        pos: 0,
        depth: 0,
        source,
    };
    let total = eval.expression()?;
    if let Some(extra) = eval.peek() {
        return Err(DiceError::syntax(source, format!("unexpected '{extra}'")));
    }

    debug!(expression = source, total, dice = pouches.len(), "expression rolled");
    Ok(ExpressionRoll {
        expression: source.to_string(),
        pretty,
        total,
        pouches,
    })
}

fn lex(source: &str) -> DiceResult<Vec<(Token, Range<usize>)>> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let slice = lexer.slice();
        let token = match result {
            Ok(RawToken::Dice) => parse_dice(source, slice)?,
            Ok(RawToken::Number) => Token::Number(
                slice
                    .parse()
                    .map_err(|_| DiceError::syntax(source, format!("{slice} is too large")))?,
            ),
            Ok(RawToken::Plus) => Token::Plus,
            Ok(RawToken::Minus) => Token::Minus,
            Ok(RawToken::Star) => Token::Star,
            Ok(RawToken::Slash) => Token::Slash,
            Ok(RawToken::LParen) => Token::LParen,
            Ok(RawToken::RParen) => Token::RParen,
            Err(()) => {
                return Err(DiceError::syntax(
                    source,
                    format!("unexpected character: {slice:?}"),
                ));
            }
        };
        tokens.push((token, span));
    }

    Ok(tokens)
}

/// Split `3d6v1` into its count, sides and drop parts.
fn parse_dice(source: &str, slice: &str) -> DiceResult<Token> {
    let lower = slice.to_ascii_lowercase();
    let too_large = || DiceError::syntax(source, format!("{slice} is too large"));

    let (count, rest) = lower.split_once('d').ok_or_else(too_large)?;
    let (sides, drop) = match rest.split_once('v') {
        Some((sides, drop)) => (sides, Some(drop)),
        None => (rest, None),
    };

    let count = if count.is_empty() {
        1
    } else {
        count.parse().map_err(|_| too_large())?
    };
    let sides = sides.parse().map_err(|_| too_large())?;
    let drop = drop
        .map(|d| d.parse::<u64>())
        .transpose()
        .map_err(|_| too_large())?;
    Ok(Token::Dice { count, sides, drop })
}

/// Recursive-descent evaluation over rolled tokens.
///
/// ```text
/// expression := term (('+' | '-') term)*
/// term       := unary (('*' | '/') unary)*
/// unary      := ('+' | '-') unary | primary
/// primary    := number | '(' expression ')'
/// ```
struct Evaluator<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    source: &'a str,
}

impl Evaluator<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn descend(&mut self) -> DiceResult<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(DiceError::syntax(self.source, "expression nested too deeply"));
        }
        Ok(())
    }

    fn expression(&mut self) -> DiceResult<i64> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    let rhs = self.term()?;
                    value = value.checked_add(rhs).ok_or(DiceError::Overflow)?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    let rhs = self.term()?;
                    value = value.checked_sub(rhs).ok_or(DiceError::Overflow)?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> DiceResult<i64> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    let rhs = self.unary()?;
                    value = value.checked_mul(rhs).ok_or(DiceError::Overflow)?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let rhs = self.unary()?;
                    if rhs == 0 {
                        return Err(DiceError::syntax(self.source, "division by zero"));
                    }
                    value = value.checked_div(rhs).ok_or(DiceError::Overflow)?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> DiceResult<i64> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                self.descend()?;
                let value = self.unary()?;
                self.depth -= 1;
                value.checked_neg().ok_or(DiceError::Overflow)
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.descend()?;
                let value = self.unary()?;
                self.depth -= 1;
                Ok(value)
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> DiceResult<i64> {
        match self.next() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::LParen) => {
                self.descend()?;
                let value = self.expression()?;
                self.depth -= 1;
                match self.next() {
                    Some(Token::RParen) => Ok(value),
                    _ => Err(DiceError::syntax(self.source, "missing ')'")),
                }
            }
            Some(other) => Err(DiceError::syntax(
                self.source,
                format!("unexpected '{other}'"),
            )),
            None => Err(DiceError::syntax(self.source, "unexpected end of expression")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn roll(expr: &str) -> DiceResult<ExpressionRoll> {
        let mut rng = StdRng::seed_from_u64(42);
        roll_expression(expr, &mut rng)
    }

    #[test]
    fn dice_plus_constant() {
        let r = roll("3d1+1").unwrap();
        assert_eq!(r.to_string(), "(1+1+1)+1 = 4");
        assert_eq!(r.pouches.len(), 1);
    }

    #[test]
    fn drop_lowest_term() {
        let r = roll("3d1v2+1").unwrap();
        assert_eq!(r.to_string(), "(1[+1+1])+1 = 2");
    }

    #[test]
    fn many_dice_compress() {
        let r = roll("100d1").unwrap();
        assert_eq!(r.to_string(), "(100x1) = 100");
    }

    #[test]
    fn whitespace_is_kept_in_pretty_form() {
        assert_eq!(roll("1d1 + 1d1").unwrap().to_string(), "(1) + (1) = 2");
        assert_eq!(roll("1d1+1d1").unwrap().to_string(), "(1)+(1) = 2");
    }

    #[test]
    fn implicit_single_die() {
        let r = roll("D1").unwrap();
        assert_eq!(r.total, 1);
        assert_eq!(r.pouches[0].len(), 1);
    }

    #[test]
    fn precedence_and_parentheses() {
        assert_eq!(roll("2*(1d1+3)").unwrap().total, 8);
        assert_eq!(roll("2+3*4").unwrap().total, 14);
        assert_eq!(roll("(2+3)*4").unwrap().total, 20);
        assert_eq!(roll("7/2").unwrap().total, 3);
        assert_eq!(roll("-1d1").unwrap().to_string(), "-(1) = -1");
    }

    #[test]
    fn plain_numbers() {
        assert_eq!(roll("5").unwrap().to_string(), "5 = 5");
    }

    #[test]
    fn seeded_roll_in_range() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let r = roll_expression("2d6", &mut rng).unwrap();
            assert!((2..=12).contains(&r.total));
        }
    }

    #[test]
    fn too_many_dice() {
        assert!(matches!(
            roll("1001d1"),
            Err(DiceError::TooManyDice { requested: 1001, .. })
        ));
        assert_eq!(roll("1001d1").unwrap_err().to_string(), "I only have 1000 dice. =(");
    }

    #[test]
    fn zero_sided_dice() {
        assert_eq!(roll("2d0").unwrap_err(), DiceError::InvalidSides(0));
    }

    #[test]
    fn empty_expression() {
        assert_eq!(roll("   ").unwrap_err(), DiceError::NoDice);
    }

    #[test]
    fn syntax_errors() {
        for bad in ["3d", "1/0", "1 2", "(1d1", "1+", "2d6 foo", ")"] {
            assert!(
                matches!(roll(bad), Err(DiceError::Syntax { .. })),
                "expected syntax error for {bad:?}"
            );
        }
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let parens = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
        assert!(matches!(roll(&parens), Err(DiceError::Syntax { .. })));

        let signs = format!("{}1", "-".repeat(200_000));
        let err = roll(&signs).unwrap_err();
        assert_eq!(
            err,
            DiceError::syntax(&signs, "expression nested too deeply")
        );
    }

    #[test]
    fn nesting_up_to_the_limit_evaluates() {
        let parens = format!("{}1d1{}", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
        assert_eq!(roll(&parens).unwrap().total, 1);
        assert_eq!(roll(&format!("{}5", "-".repeat(MAX_NESTING))).unwrap().total, 5);
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(
            roll("9223372036854775807+1").unwrap_err(),
            DiceError::Overflow
        );
    }
}
