use crate::ast::Expr;
use crate::lexer::{tokenize, LexError, SpannedToken, Token};

/// Parser error types.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("unexpected token: {found}, expected: {expected}")]
    UnexpectedToken { found: String, expected: String },
    #[error("unexpected end of input")]
    UnexpectedEof,
}

/// Parse formula text into an AST.
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser::new(tokens);
    let expr = parser.parse_expr()?;
    match parser.peek() {
        Token::Eof => Ok(expr),
        other => Err(ParseError::UnexpectedToken {
            found: other.to_string(),
            expected: "end of input".to_string(),
        }),
    }
}

static EOF: Token = Token::Eof;

struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<SpannedToken>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .map(|t| &t.token)
            .unwrap_or(&EOF)
    }

    fn advance(&mut self) -> &Token {
        let token = self
            .tokens
            .get(self.pos)
            .map(|t| &t.token)
            .unwrap_or(&EOF);
        self.pos += 1;
        token
    }

    fn expect(&mut self, expected: &Token) -> Result<(), ParseError> {
        let found = self.advance().clone();
        if &found == expected {
            Ok(())
        } else if found == Token::Eof {
            Err(ParseError::UnexpectedEof)
        } else {
            Err(ParseError::UnexpectedToken {
                found: found.to_string(),
                expected: expected.to_string(),
            })
        }
    }

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_primary()?;

        let make: fn(Box<Expr>, Box<Expr>) -> Expr = match self.peek() {
            Token::Eq => Expr::Eq,
            Token::Neq => Expr::Neq,
            Token::Lt => Expr::Lt,
            Token::Gt => Expr::Gt,
            Token::Lte => Expr::Lte,
            Token::Gte => Expr::Gte,
            _ => return Ok(left),
        };
        self.advance();
        let right = self.parse_primary()?;
        Ok(make(Box::new(left), Box::new(right)))
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek().clone() {
            Token::String(s) => {
                self.advance();
                Ok(Expr::StringLiteral(s))
            }
            Token::Integer(n) => {
                self.advance();
                Ok(Expr::IntLiteral(n))
            }
            Token::Float(n) => {
                self.advance();
                Ok(Expr::FloatLiteral(n))
            }
            Token::Field(name) => {
                self.advance();
                Ok(Expr::Field(name))
            }
            Token::Ident(name) => {
                self.advance();
                self.expect(&Token::LParen)?;
                let mut args = Vec::new();
                if self.peek() != &Token::RParen {
                    args.push(self.parse_expr()?);
                    while self.peek() == &Token::Comma {
                        self.advance();
                        args.push(self.parse_expr()?);
                    }
                }
                self.expect(&Token::RParen)?;
                Ok(match (name.as_str(), args.is_empty()) {
                    ("TRUE", true) => Expr::BoolLiteral(true),
                    ("FALSE", true) => Expr::BoolLiteral(false),
                    _ => Expr::FuncCall(name, args),
                })
            }
            Token::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(&Token::RParen)?;
                Ok(expr)
            }
            Token::Eof => Err(ParseError::UnexpectedEof),
            other => Err(ParseError::UnexpectedToken {
                found: other.to_string(),
                expected: "expression".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_field_equality() {
        let expr = parse(r#"{Content Status} = "Review""#).unwrap();
        assert_eq!(
            expr,
            Expr::field("Content Status").equals(Expr::string("Review"))
        );
    }

    #[test]
    fn parse_nested_functions() {
        let expr = parse(r#"AND({Status} != "Draft", NOT(BLANK()), TRUE())"#).unwrap();
        match expr {
            Expr::FuncCall(name, args) => {
                assert_eq!(name, "AND");
                assert_eq!(args.len(), 3);
                assert!(matches!(args[0], Expr::Neq(_, _)));
                assert!(matches!(&args[1], Expr::FuncCall(n, inner) if n == "NOT" && inner.len() == 1));
                assert_eq!(args[2], Expr::BoolLiteral(true));
            }
            _ => panic!("expected FuncCall, got {expr:?}"),
        }
    }

    #[test]
    fn rendered_formula_parses_back() {
        let original = Expr::FuncCall(
            "AND".into(),
            vec![
                Expr::field("Content Status").equals(Expr::string("Review")),
                Expr::FuncCall(
                    "NOT".into(),
                    vec![Expr::Gte(
                        Box::new(Expr::field("Slide Count")),
                        Box::new(Expr::FloatLiteral(3.0)),
                    )],
                ),
            ],
        );
        assert_eq!(parse(&original.to_string()).unwrap(), original);
    }

    #[test]
    fn parenthesised_expression() {
        let expr = parse("({Slide Count} > 2)").unwrap();
        assert!(matches!(expr, Expr::Gt(_, _)));
    }

    #[test]
    fn bare_identifier_needs_call() {
        assert!(matches!(
            parse("TRUE"),
            Err(ParseError::UnexpectedEof)
        ));
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        assert!(matches!(
            parse(r#"{A} = "x" "y""#),
            Err(ParseError::UnexpectedToken { .. })
        ));
    }
}
