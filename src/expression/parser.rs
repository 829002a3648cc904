//! Expression string parser.

use super::ast::{ExpressionNode, Literal, Operation, PathKey};
use super::error::ParseError;

/// Recursive-descent parser for expression strings.
///
/// Binary operators from loosest to tightest: `|`, `,`, `=` and `@=`
/// (right associative), `==`, `+`.
pub struct Parser {
    input: Vec<char>,
    position: usize,
}

impl Parser {
    /// Creates a new parser for the given expression string.
    pub fn new(text: &str) -> Self {
        Self {
            input: text.chars().collect(),
            position: 0,
        }
    }

    /// Parses the expression string into an operator tree.
    pub fn parse(text: &str) -> Result<ExpressionNode, ParseError> {
        let mut parser = Parser::new(text);
        let tree = parser.parse_pipe()?;
        parser.skip_whitespace();
        match parser.peek() {
            None => Ok(tree),
            Some(ch) => Err(ParseError::UnexpectedToken {
                position: parser.position,
                found: ch.to_string(),
                expected: "end of expression".to_string(),
            }),
        }
    }

    fn parse_pipe(&mut self) -> Result<ExpressionNode, ParseError> {
        let mut lhs = self.parse_union()?;
        loop {
            self.skip_whitespace();
            if self.peek() != Some('|') {
                return Ok(lhs);
            }
            self.next();
            let rhs = self.parse_union()?;
            lhs = ExpressionNode::binary(Operation::Pipe, lhs, rhs);
        }
    }

    fn parse_union(&mut self) -> Result<ExpressionNode, ParseError> {
        let mut lhs = self.parse_assign()?;
        loop {
            self.skip_whitespace();
            if self.peek() != Some(',') {
                return Ok(lhs);
            }
            self.next();
            let rhs = self.parse_assign()?;
            lhs = ExpressionNode::binary(Operation::Union, lhs, rhs);
        }
    }

    fn parse_assign(&mut self) -> Result<ExpressionNode, ParseError> {
        let lhs = self.parse_equals()?;
        self.skip_whitespace();
        let operation = match (self.peek(), self.peek_at(1)) {
            (Some('@'), Some('=')) => {
                self.position += 2;
                Operation::AssignAttributes
            }
            (Some('='), next) if next != Some('=') => {
                self.position += 1;
                Operation::Assign
            }
            _ => return Ok(lhs),
        };
        let rhs = self.parse_assign()?;
        Ok(ExpressionNode::binary(operation, lhs, rhs))
    }

    fn parse_equals(&mut self) -> Result<ExpressionNode, ParseError> {
        let mut lhs = self.parse_add()?;
        loop {
            self.skip_whitespace();
            if self.peek() != Some('=') || self.peek_at(1) != Some('=') {
                return Ok(lhs);
            }
            self.position += 2;
            let rhs = self.parse_add()?;
            lhs = ExpressionNode::binary(Operation::Equals, lhs, rhs);
        }
    }

    fn parse_add(&mut self) -> Result<ExpressionNode, ParseError> {
        let mut lhs = self.parse_postfix()?;
        loop {
            self.skip_whitespace();
            if self.peek() != Some('+') {
                return Ok(lhs);
            }
            self.next();
            let rhs = self.parse_postfix()?;
            lhs = ExpressionNode::binary(Operation::Add, lhs, rhs);
        }
    }

    /// Parses a primary followed by any chained path segments.
    fn parse_postfix(&mut self) -> Result<ExpressionNode, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            let key = match (self.peek(), self.peek_at(1)) {
                (Some('['), _) => self.parse_bracket()?,
                (Some('.'), Some(next)) if is_key_start(next) || next == '"' || next == '[' => {
                    self.next();
                    self.parse_segment()?
                }
                _ => return Ok(expr),
            };
            let step = ExpressionNode::leaf(Operation::Traverse(key));
            expr = ExpressionNode::binary(Operation::Pipe, expr, step);
        }
    }

    fn parse_primary(&mut self) -> Result<ExpressionNode, ParseError> {
        self.skip_whitespace();
        let start = self.position;
        match self.peek() {
            None => Err(ParseError::UnexpectedEnd {
                expected: "expression".to_string(),
            }),
            Some('.') => {
                self.next();
                match self.peek() {
                    Some('.') => {
                        self.next();
                        Ok(ExpressionNode::leaf(Operation::RecursiveDescent))
                    }
                    Some(ch) if is_key_start(ch) || ch == '"' || ch == '[' => {
                        let key = self.parse_segment()?;
                        Ok(ExpressionNode::leaf(Operation::Traverse(key)))
                    }
                    _ => Ok(ExpressionNode::leaf(Operation::SelfReference)),
                }
            }
            Some('(') => {
                self.next();
                let inner = self.parse_pipe()?;
                self.expect(')')?;
                Ok(inner)
            }
            Some('"') => {
                let text = self.parse_string()?;
                Ok(ExpressionNode::leaf(Operation::Literal(Literal::String(text))))
            }
            Some(ch) if ch.is_ascii_digit() || ch == '-' => {
                let literal = self.parse_number()?;
                Ok(ExpressionNode::leaf(Operation::Literal(literal)))
            }
            Some(ch) if ch.is_alphabetic() => {
                let word = self.parse_identifier()?;
                match word.as_str() {
                    "true" => Ok(ExpressionNode::leaf(Operation::Literal(Literal::Boolean(true)))),
                    "false" => Ok(ExpressionNode::leaf(Operation::Literal(Literal::Boolean(false)))),
                    "null" => Ok(ExpressionNode::leaf(Operation::Literal(Literal::Null))),
                    "documentIndex" | "di" => Ok(ExpressionNode::leaf(Operation::DocumentIndex)),
                    "filename" => Ok(ExpressionNode::leaf(Operation::Filename)),
                    "select" => {
                        self.expect('(')?;
                        let condition = self.parse_pipe()?;
                        self.expect(')')?;
                        Ok(ExpressionNode::unary(Operation::Select, condition))
                    }
                    _ => Err(ParseError::UnexpectedToken {
                        position: start,
                        found: word,
                        expected: "expression".to_string(),
                    }),
                }
            }
            Some(ch) => Err(ParseError::UnexpectedToken {
                position: start,
                found: ch.to_string(),
                expected: "expression".to_string(),
            }),
        }
    }

    /// Parses what follows a '.': key, quoted key or bracket.
    fn parse_segment(&mut self) -> Result<PathKey, ParseError> {
        match self.peek() {
            Some('"') => Ok(PathKey::Key(self.parse_string()?)),
            Some('[') => self.parse_bracket(),
            _ => Ok(PathKey::Key(self.parse_identifier()?)),
        }
    }

    /// Parses bracket expression: [n], [-n], [] or ["key"]
    fn parse_bracket(&mut self) -> Result<PathKey, ParseError> {
        self.expect('[')?;
        self.skip_whitespace();
        let key = match self.peek() {
            Some(']') => PathKey::Splat,
            Some('"') => PathKey::Key(self.parse_string()?),
            Some(ch) if ch.is_ascii_digit() || ch == '-' => match self.parse_number()? {
                Literal::Integer(index) => PathKey::Index(index as isize),
                _ => {
                    return Err(ParseError::InvalidSyntax {
                        message: "Index must be an integer".to_string(),
                    })
                }
            },
            Some(ch) => {
                return Err(ParseError::UnexpectedToken {
                    position: self.position,
                    found: ch.to_string(),
                    expected: "index, quoted key or ']'".to_string(),
                })
            }
            None => {
                return Err(ParseError::UnexpectedEnd {
                    expected: "']'".to_string(),
                })
            }
        };
        self.expect(']')?;
        Ok(key)
    }

    /// Parses a double-quoted string with `\"`, `\\`, `\n` and `\t` escapes.
    fn parse_string(&mut self) -> Result<String, ParseError> {
        self.expect('"')?;
        let mut text = String::new();
        loop {
            match self.next() {
                Some('"') => return Ok(text),
                Some('\\') => match self.next() {
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some(ch @ ('"' | '\\')) => text.push(ch),
                    Some(ch) => {
                        return Err(ParseError::InvalidSyntax {
                            message: format!("Unknown escape sequence '\\{}'", ch),
                        })
                    }
                    None => {
                        return Err(ParseError::UnexpectedEnd {
                            expected: "closing '\"'".to_string(),
                        })
                    }
                },
                Some(ch) => text.push(ch),
                None => {
                    return Err(ParseError::UnexpectedEnd {
                        expected: "closing '\"'".to_string(),
                    })
                }
            }
        }
    }

    fn parse_number(&mut self) -> Result<Literal, ParseError> {
        let start = self.position;
        let mut text = String::new();
        if self.peek() == Some('-') {
            text.push('-');
            self.next();
        }
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() || ch == '.' {
                text.push(ch);
                self.next();
            } else {
                break;
            }
        }
        if let Ok(value) = text.parse::<i64>() {
            return Ok(Literal::Integer(value));
        }
        match text.parse::<f64>() {
            Ok(value) => Ok(Literal::Float(value)),
            Err(_) => Err(ParseError::UnexpectedToken {
                position: start,
                found: text,
                expected: "number".to_string(),
            }),
        }
    }

    /// Parses an identifier (key name or keyword).
    fn parse_identifier(&mut self) -> Result<String, ParseError> {
        let mut name = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' || ch == '-' {
                name.push(ch);
                self.next();
            } else {
                break;
            }
        }
        if name.is_empty() {
            Err(ParseError::InvalidSyntax {
                message: "Expected identifier".to_string(),
            })
        } else {
            Ok(name)
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    /// Returns the next character and advances position.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.position += 1;
        }
    }

    /// Expects a specific character and advances, or returns an error.
    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        self.skip_whitespace();
        let pos = self.position;
        match self.next() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => Err(ParseError::UnexpectedToken {
                position: pos,
                found: ch.to_string(),
                expected: format!("'{}'", expected),
            }),
            None => Err(ParseError::UnexpectedEnd {
                expected: format!("'{}'", expected),
            }),
        }
    }
}

fn is_key_start(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
