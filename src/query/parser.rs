//! Query Parser
//!
//! Recursive descent parser for the constrained path grammar:
//!
//! ```text
//! query     := ("/" | "//")? step (("/" | "//") step)*
//! step      := nametest predicate*
//! nametest  := Name | "*"
//! predicate := "[" "@" Name ("=" String)? "]" | "[" Number "]"
//! ```

use super::lexer::{Lexer, Token};

/// Axis of a location step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Child,
    Descendant,
}

/// Node test in a location step
#[derive(Debug, Clone, PartialEq)]
pub enum NodeTest {
    /// Matches elements with this name
    Name(String),
    /// Matches any element (*)
    Any,
}

/// Predicate applied to a step's matches
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// [@name] - the attribute exists
    HasAttribute(String),
    /// [@name='value'] - the attribute has exactly this value
    AttributeEquals(String, String),
    /// [n] - 1-based position among the matches under one context node
    Position(usize),
}

/// Location step in a path
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub axis: Axis,
    pub node_test: NodeTest,
    pub predicates: Vec<Predicate>,
}

/// Query parser
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser
    pub fn new(input: &'a str) -> Result<Self, String> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Parser { lexer, current })
    }

    /// Advance to next token
    fn advance(&mut self) -> Result<(), String> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    /// Parse a whole query into its location steps
    pub fn parse(&mut self) -> Result<Vec<Step>, String> {
        let mut steps = Vec::new();

        // A leading separator is optional; relative and absolute paths
        // both anchor at the document node
        let mut axis = match self.current {
            Token::Slash => {
                self.advance()?;
                Axis::Child
            }
            Token::DoubleSlash => {
                self.advance()?;
                Axis::Descendant
            }
            _ => Axis::Child,
        };

        loop {
            steps.push(self.parse_step(axis)?);
            axis = match self.current {
                Token::Slash => {
                    self.advance()?;
                    Axis::Child
                }
                Token::DoubleSlash => {
                    self.advance()?;
                    Axis::Descendant
                }
                Token::Eof => break,
                ref token => return Err(format!("unexpected token after step: {:?}", token)),
            };
        }

        Ok(steps)
    }

    /// Parse a location step with the given axis
    fn parse_step(&mut self, axis: Axis) -> Result<Step, String> {
        let node_test = match &self.current {
            Token::Name(name) => {
                let test = NodeTest::Name(name.clone());
                self.advance()?;
                test
            }
            Token::Star => {
                self.advance()?;
                NodeTest::Any
            }
            token => return Err(format!("expected a name test or `*`, got {:?}", token)),
        };

        let mut predicates = Vec::new();
        while matches!(self.current, Token::LeftBracket) {
            self.advance()?;
            predicates.push(self.parse_predicate()?);
            if !matches!(self.current, Token::RightBracket) {
                return Err("expected `]`".to_string());
            }
            self.advance()?;
        }

        Ok(Step {
            axis,
            node_test,
            predicates,
        })
    }

    /// Parse a predicate body
    fn parse_predicate(&mut self) -> Result<Predicate, String> {
        match self.current.clone() {
            Token::At => {
                self.advance()?;
                let name = match self.current.clone() {
                    Token::Name(name) => {
                        self.advance()?;
                        name
                    }
                    token => return Err(format!("expected an attribute name, got {:?}", token)),
                };
                if matches!(self.current, Token::Eq) {
                    self.advance()?;
                    match self.current.clone() {
                        Token::String(value) => {
                            self.advance()?;
                            Ok(Predicate::AttributeEquals(name, value))
                        }
                        token => Err(format!("expected a string literal, got {:?}", token)),
                    }
                } else {
                    Ok(Predicate::HasAttribute(name))
                }
            }
            Token::Number(position) => {
                self.advance()?;
                if position == 0 {
                    return Err("positional predicates are 1-based".to_string());
                }
                Ok(Predicate::Position(position))
            }
            token => Err(format!("expected `@` or a position, got {:?}", token)),
        }
    }
}

/// Parse a query expression string
pub fn parse(input: &str) -> Result<Vec<Step>, String> {
    Parser::new(input)?.parse()
}
