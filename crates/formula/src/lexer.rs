use std::fmt;

use serde::{Deserialize, Serialize};

/// Token types produced by the formula lexer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Token {
    /// A string literal, escapes resolved.
    String(String),
    /// An integer literal.
    Integer(i64),
    /// A floating-point literal.
    Float(f64),
    /// A field reference, `{Field Name}`.
    Field(String),
    /// A function name such as `AND` or `BLANK`.
    Ident(String),

    Eq,  // =
    Neq, // !=
    Lt,  // <
    Gt,  // >
    Lte, // <=
    Gte, // >=

    Comma,  // ,
    LParen, // (
    RParen, // )

    /// The end of the input.
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::String(s) => write!(f, "\"{s}\""),
            Token::Integer(n) => write!(f, "{n}"),
            Token::Float(n) => write!(f, "{n}"),
            Token::Field(name) => write!(f, "{{{name}}}"),
            Token::Ident(s) => write!(f, "{s}"),
            Token::Eq => write!(f, "="),
            Token::Neq => write!(f, "!="),
            Token::Lt => write!(f, "<"),
            Token::Gt => write!(f, ">"),
            Token::Lte => write!(f, "<="),
            Token::Gte => write!(f, ">="),
            Token::Comma => write!(f, ","),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Eof => write!(f, "EOF"),
        }
    }
}

/// Position in source code for error reporting, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// A token with its source position.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

/// Lexer error.
#[derive(Debug, thiserror::Error)]
pub enum LexError {
    #[error("unexpected character '{0}' at position {1}")]
    UnexpectedChar(char, usize),
    #[error("unterminated string starting at position {0}")]
    UnterminatedString(usize),
    #[error("unterminated field reference starting at position {0}")]
    UnterminatedField(usize),
    #[error("invalid number '{0}' at position {1}")]
    InvalidNumber(String, usize),
}

/// Tokenize a formula into a sequence of tokens.
pub fn tokenize(input: &str) -> Result<Vec<SpannedToken>, LexError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let mut pos = 0;

    while pos < chars.len() {
        let ch = chars[pos];

        if ch.is_whitespace() {
            pos += 1;
            continue;
        }

        let start = pos;

        let token = match ch {
            ',' => {
                pos += 1;
                Token::Comma
            }
            '(' => {
                pos += 1;
                Token::LParen
            }
            ')' => {
                pos += 1;
                Token::RParen
            }
            '=' => {
                pos += 1;
                Token::Eq
            }
            '!' => {
                if pos + 1 < chars.len() && chars[pos + 1] == '=' {
                    pos += 2;
                    Token::Neq
                } else {
                    return Err(LexError::UnexpectedChar(ch, pos));
                }
            }
            '<' => {
                if pos + 1 < chars.len() && chars[pos + 1] == '=' {
                    pos += 2;
                    Token::Lte
                } else {
                    pos += 1;
                    Token::Lt
                }
            }
            '>' => {
                if pos + 1 < chars.len() && chars[pos + 1] == '=' {
                    pos += 2;
                    Token::Gte
                } else {
                    pos += 1;
                    Token::Gt
                }
            }
            '{' => {
                pos += 1;
                let mut name = String::new();
                while pos < chars.len() && chars[pos] != '}' {
                    name.push(chars[pos]);
                    pos += 1;
                }
                if pos >= chars.len() {
                    return Err(LexError::UnterminatedField(start));
                }
                pos += 1; // closing brace
                Token::Field(name)
            }
            '"' | '\'' => {
                let quote = ch;
                pos += 1;
                let mut value = String::new();
                while pos < chars.len() && chars[pos] != quote {
                    if chars[pos] == '\\' && pos + 1 < chars.len() {
                        pos += 1;
                    }
                    value.push(chars[pos]);
                    pos += 1;
                }
                if pos >= chars.len() {
                    return Err(LexError::UnterminatedString(start));
                }
                pos += 1; // closing quote
                Token::String(value)
            }
            '-' if pos + 1 < chars.len() && chars[pos + 1].is_ascii_digit() => {
                pos += 1;
                lex_number(&chars, &mut pos, start, true)?
            }
            c if c.is_ascii_digit() => lex_number(&chars, &mut pos, start, false)?,
            c if c.is_alphabetic() || c == '_' => {
                let mut word = String::new();
                while pos < chars.len() && (chars[pos].is_alphanumeric() || chars[pos] == '_') {
                    word.push(chars[pos]);
                    pos += 1;
                }
                Token::Ident(word.to_uppercase())
            }
            _ => return Err(LexError::UnexpectedChar(ch, pos)),
        };

        tokens.push(SpannedToken {
            token,
            span: Span { start, end: pos },
        });
    }

    tokens.push(SpannedToken {
        token: Token::Eof,
        span: Span {
            start: pos,
            end: pos,
        },
    });

    Ok(tokens)
}

fn lex_number(
    chars: &[char],
    pos: &mut usize,
    start: usize,
    negative: bool,
) -> Result<Token, LexError> {
    let mut text = String::new();
    if negative {
        text.push('-');
    }
    let mut is_float = false;
    while *pos < chars.len() && (chars[*pos].is_ascii_digit() || chars[*pos] == '.') {
        if chars[*pos] == '.' {
            is_float = true;
        }
        text.push(chars[*pos]);
        *pos += 1;
    }
    let invalid = |text: String| LexError::InvalidNumber(text, start);
    if is_float {
        text.parse().map(Token::Float).map_err(|_| invalid(text))
    } else {
        text.parse().map(Token::Integer).map_err(|_| invalid(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(input: &str) -> Vec<Token> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn tokenize_field_comparison() {
        let tokens = tok(r#"{Content Status} = "Review""#);
        assert_eq!(tokens[0], Token::Field("Content Status".into()));
        assert_eq!(tokens[1], Token::Eq);
        assert_eq!(tokens[2], Token::String("Review".into()));
        assert_eq!(tokens[3], Token::Eof);
    }

    #[test]
    fn tokenize_function_call() {
        let tokens = tok("and({A}, not(blank()))");
        assert_eq!(tokens[0], Token::Ident("AND".into()));
        assert_eq!(tokens[1], Token::LParen);
        assert_eq!(tokens[2], Token::Field("A".into()));
        assert_eq!(tokens[3], Token::Comma);
        assert_eq!(tokens[4], Token::Ident("NOT".into()));
        assert_eq!(tokens[6], Token::Ident("BLANK".into()));
    }

    #[test]
    fn tokenize_numbers() {
        let tokens = tok("42 3.125 -7");
        assert_eq!(tokens[0], Token::Integer(42));
        assert_eq!(tokens[1], Token::Float(3.125));
        assert_eq!(tokens[2], Token::Integer(-7));
    }

    #[test]
    fn tokenize_comparison_operators() {
        let tokens = tok("< > <= >= = !=");
        assert_eq!(tokens[0], Token::Lt);
        assert_eq!(tokens[1], Token::Gt);
        assert_eq!(tokens[2], Token::Lte);
        assert_eq!(tokens[3], Token::Gte);
        assert_eq!(tokens[4], Token::Eq);
        assert_eq!(tokens[5], Token::Neq);
    }

    #[test]
    fn string_escapes_are_resolved() {
        let tokens = tok(r#""say \"hi\"" 'it\'s'"#);
        assert_eq!(tokens[0], Token::String(r#"say "hi""#.into()));
        assert_eq!(tokens[1], Token::String("it's".into()));
    }

    #[test]
    fn spans_count_characters() {
        let tokens = tokenize("{Café} = 1").unwrap();
        assert_eq!(tokens[0].span, Span { start: 0, end: 6 });
        assert_eq!(tokens[1].span, Span { start: 7, end: 8 });
    }

    #[test]
    fn unterminated_string_error() {
        assert!(matches!(
            tokenize("\"hello"),
            Err(LexError::UnterminatedString(0))
        ));
    }

    #[test]
    fn unterminated_field_error() {
        assert!(matches!(
            tokenize("x = {Title"),
            Err(LexError::UnterminatedField(4))
        ));
    }

    #[test]
    fn bare_bang_is_rejected() {
        assert!(matches!(tokenize("!{A}"), Err(LexError::UnexpectedChar('!', 0))));
    }
}
