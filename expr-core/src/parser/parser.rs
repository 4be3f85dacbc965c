use crate::{
    lexer::prelude::{LexResult, Lexer, LexicalError, Spanned, Token},
    utils::prelude::SrcSpan,
};
use super::ast::{
    Assign, Binary, BinaryOp, Compare, CompareOp, Expression, Primitive,
    Ternary, Tuple, Unary, UnaryOp, Walrus,
};
use super::error::{ParseError, ParseErrorType};

// One method per precedence tier, loosest binding first:
//
//   expression (comma) -> assign -> walrus -> ternary -> or -> and -> not
//     -> comparison -> bitor -> bitxor -> bitand -> shift -> additive
//     -> multiplicative -> unary -> power -> atom
//
// Left-associative tiers fold iteratively through `parse_left_assoc`;
// right-associative tiers (assign, walrus, ternary, power) recurse into
// their own level for the right-hand side.
pub struct Parser<T: Iterator<Item = LexResult>> {
    pub current_token: Option<Spanned>,
    pub next_token: Option<Spanned>,
    pub comments: Vec<SrcSpan>,
    pub lex_errors: Vec<LexicalError>,

    tokens: T,
}

impl<T: Iterator<Item = LexResult>> Parser<T> {
    pub fn new(input: T) -> Self {
        let mut parser = Self {
            current_token: None,
            next_token: None,
            comments: vec![],
            lex_errors: vec![],

            tokens: input,
        };

        parser.step();
        parser.step();

        parser
    }

    pub fn step(&mut self) {
        let _ = self.next_token();
    }

    pub fn next_token(&mut self) -> Option<Spanned> {
        let t = self.current_token.take();
        let mut next = None;

        loop {
            match self.tokens.next() {
                Some(Ok((start, Token::Comment, end))) => {
                    self.comments.push(SrcSpan { start, end })
                },
                Some(Err(err)) => {
                    self.lex_errors.push(err);

                    break;
                },
                Some(Ok(tok)) => {
                    next = Some(tok);

                    break;
                },
                None => {
                    break;
                }
            }
        }

        self.current_token = self.next_token.take();
        self.next_token = next;

        t
    }

    pub fn parse(&mut self) -> Result<Expression, ParseError> {
        if matches!(self.current_token, Some((_, Token::Eof, _)) | None) {
            return parse_error(ParseErrorType::EmptyInput, SrcSpan { start: 0, end: 0 });
        }

        let expression = match self.parse_expression() {
            Ok(expression) => expression,
            Err(err) => return Err(self.prefer_lex_error(err)),
        };

        if let Some(error) = self.lex_errors.first() {
            return parse_error(
                ParseErrorType::LexError { error: *error },
                error.location
            );
        }

        match &self.current_token {
            Some((_, Token::Eof, _)) | None => Ok(expression),
            Some((start, token, end)) => parse_error(
                ParseErrorType::UnexpectedToken {
                    token: token.clone(),
                    expected: vec!["end of input".to_string()],
                },
                SrcSpan { start: *start, end: *end }
            ),
        }
    }

    // a lexer failure truncates the token stream, so the error the parser
    // tripped over is a symptom; report the lexical cause instead
    fn prefer_lex_error(&self, fallback: ParseError) -> ParseError {
        match self.lex_errors.first() {
            Some(error) => ParseError {
                error: ParseErrorType::LexError { error: *error },
                span: error.location,
            },
            None => fallback,
        }
    }

    pub fn expect_one(&mut self, token: Token) -> Result<(u32, u32), ParseError> {
        match self.current_token.take() {
            Some((start, tok, end)) if tok == token => {
                self.step();
                Ok((start, end))
            },
            Some(t) => {
                let (start, tok, end) = t.clone();
                self.current_token = Some(t);

                parse_error(
                    ParseErrorType::UnexpectedToken {
                        token: tok,
                        expected: vec![format!("`{}`", token.as_literal())],
                    },
                    SrcSpan { start, end }
                )
            },
            None => {
                parse_error(
                    ParseErrorType::UnexpectedEof,
                    SrcSpan { start: 0, end: 0 }
                )
            }
        }
    }

    // comma level: one `assign` operand stays unwrapped; a comma collects
    // elements into a Tuple, with a trailing comma terminating it
    pub fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        let first = self.parse_assign()?;

        if !matches!(self.current_token, Some((_, Token::Comma, _))) {
            return Ok(first);
        }

        let start = first.location().start;
        let mut end = first.location().end;
        let mut elements = vec![first];

        loop {
            let comma_end = match &self.current_token {
                Some((_, Token::Comma, end)) => *end,
                _ => break,
            };

            end = comma_end;
            self.step();

            let starts = matches!(
                &self.current_token,
                Some((_, token, _)) if token.starts_expression()
            );

            if !starts {
                break;
            }

            let element = self.parse_assign()?;
            end = element.location().end;
            elements.push(element);
        }

        Ok(Expression::Tuple(Tuple {
            elements,
            location: SrcSpan { start, end }
        }))
    }

    fn parse_assign(&mut self) -> Result<Expression, ParseError> {
        let expression = self.parse_walrus()?;

        if !matches!(self.current_token, Some((_, Token::Assign, _))) {
            return Ok(expression);
        }

        let target = match expression {
            Expression::Identifier(identifier) => identifier,
            other => return parse_error(
                ParseErrorType::InvalidAssignmentTarget,
                other.location()
            ),
        };

        self.step();

        let start = target.location.start;

        // right-associative; `a = b = c` flattens into one node
        match self.parse_assign()? {
            Expression::Assign(assign) => {
                let mut targets = vec![target];
                targets.extend(assign.targets);

                Ok(Expression::Assign(Assign {
                    targets,
                    value: assign.value,
                    location: SrcSpan { start, end: assign.location.end }
                }))
            },
            value => {
                let end = value.location().end;

                Ok(Expression::Assign(Assign {
                    targets: vec![target],
                    value: Box::new(value),
                    location: SrcSpan { start, end }
                }))
            }
        }
    }

    fn parse_walrus(&mut self) -> Result<Expression, ParseError> {
        let expression = self.parse_ternary()?;

        if !matches!(self.current_token, Some((_, Token::Walrus, _))) {
            return Ok(expression);
        }

        let name = match expression {
            Expression::Identifier(identifier) => identifier,
            other => return parse_error(
                ParseErrorType::InvalidAssignmentTarget,
                other.location()
            ),
        };

        self.step();

        let value = self.parse_walrus()?;
        let location = SrcSpan {
            start: name.location.start,
            end: value.location().end
        };

        Ok(Expression::Walrus(Walrus {
            name,
            value: Box::new(value),
            location
        }))
    }

    fn parse_ternary(&mut self) -> Result<Expression, ParseError> {
        let truthy = self.parse_or()?;

        if !matches!(self.current_token, Some((_, Token::If, _))) {
            return Ok(truthy);
        }

        self.step();

        let condition = self.parse_or()?;

        if let Err(err) = self.expect_one(Token::Else) {
            return parse_error(ParseErrorType::ExpectedElse, err.span);
        }

        // the else branch re-enters this tier: `a if b else c if d else e`
        // groups to the right
        let falsy = self.parse_ternary()?;
        let location = SrcSpan {
            start: truthy.location().start,
            end: falsy.location().end
        };

        Ok(Expression::Ternary(Ternary {
            condition: Box::new(condition),
            truthy: Box::new(truthy),
            falsy: Box::new(falsy),
            location
        }))
    }

    fn parse_or(&mut self) -> Result<Expression, ParseError> {
        self.parse_left_assoc(Self::parse_and, |token| match token {
            Token::Or => Some(BinaryOp::Or),
            _ => None,
        })
    }

    fn parse_and(&mut self) -> Result<Expression, ParseError> {
        self.parse_left_assoc(Self::parse_not, |token| match token {
            Token::And => Some(BinaryOp::And),
            _ => None,
        })
    }

    fn parse_not(&mut self) -> Result<Expression, ParseError> {
        let start = match &self.current_token {
            Some((start, Token::Not, _)) => *start,
            _ => return self.parse_comparison(),
        };

        self.step();

        // `not not x` stacks
        let operand = self.parse_not()?;
        let location = SrcSpan { start, end: operand.location().end };

        Ok(Expression::Unary(Unary {
            op: UnaryOp::Not,
            operand: Box::new(operand),
            location
        }))
    }

    fn parse_comparison(&mut self) -> Result<Expression, ParseError> {
        let first = self.parse_bitor()?;
        let mut comparisons: Vec<(CompareOp, Expression)> = vec![];
        let mut end = first.location().end;

        loop {
            // `is not` and `not in` span two tokens; the second lookahead
            // token decides
            let matched = match &self.current_token {
                Some((_, token, _)) => match token {
                    Token::Equal => Some((CompareOp::Eq, false)),
                    Token::NotEqual => Some((CompareOp::NotEq, false)),
                    Token::LessThan => Some((CompareOp::Lt, false)),
                    Token::LessThanOrEqual => Some((CompareOp::LtEq, false)),
                    Token::GreaterThan => Some((CompareOp::Gt, false)),
                    Token::GreaterThanOrEqual => Some((CompareOp::GtEq, false)),
                    Token::In => Some((CompareOp::In, false)),
                    Token::Is => match &self.next_token {
                        Some((_, Token::Not, _)) => Some((CompareOp::IsNot, true)),
                        _ => Some((CompareOp::Is, false)),
                    },
                    Token::Not => match &self.next_token {
                        Some((_, Token::In, _)) => Some((CompareOp::NotIn, true)),
                        _ => None,
                    },
                    _ => None,
                },
                None => None,
            };

            let Some((op, two_tokens)) = matched else { break };

            self.step();
            if two_tokens {
                self.step();
            }

            let operand = self.parse_bitor()?;
            end = operand.location().end;
            comparisons.push((op, operand));
        }

        if comparisons.is_empty() {
            return Ok(first);
        }

        let location = SrcSpan { start: first.location().start, end };

        Ok(Expression::Compare(Compare {
            first: Box::new(first),
            comparisons,
            location
        }))
    }

    fn parse_bitor(&mut self) -> Result<Expression, ParseError> {
        self.parse_left_assoc(Self::parse_bitxor, |token| match token {
            Token::Pipe => Some(BinaryOp::BitOr),
            _ => None,
        })
    }

    fn parse_bitxor(&mut self) -> Result<Expression, ParseError> {
        self.parse_left_assoc(Self::parse_bitand, |token| match token {
            Token::Caret => Some(BinaryOp::BitXor),
            _ => None,
        })
    }

    fn parse_bitand(&mut self) -> Result<Expression, ParseError> {
        self.parse_left_assoc(Self::parse_shift, |token| match token {
            Token::Ampersand => Some(BinaryOp::BitAnd),
            _ => None,
        })
    }

    fn parse_shift(&mut self) -> Result<Expression, ParseError> {
        self.parse_left_assoc(Self::parse_additive, |token| match token {
            Token::ShiftLeft => Some(BinaryOp::Shl),
            Token::ShiftRight => Some(BinaryOp::Shr),
            _ => None,
        })
    }

    fn parse_additive(&mut self) -> Result<Expression, ParseError> {
        self.parse_left_assoc(Self::parse_multiplicative, |token| match token {
            Token::Plus => Some(BinaryOp::Add),
            Token::Minus => Some(BinaryOp::Sub),
            _ => None,
        })
    }

    fn parse_multiplicative(&mut self) -> Result<Expression, ParseError> {
        self.parse_left_assoc(Self::parse_unary, |token| match token {
            Token::Asterisk => Some(BinaryOp::Mul),
            Token::Slash => Some(BinaryOp::Div),
            Token::DoubleSlash => Some(BinaryOp::FloorDiv),
            Token::Percent => Some(BinaryOp::Mod),
            _ => None,
        })
    }

    fn parse_left_assoc(
        &mut self,
        next: fn(&mut Self) -> Result<Expression, ParseError>,
        matcher: fn(&Token) -> Option<BinaryOp>,
    ) -> Result<Expression, ParseError> {
        let mut left = next(self)?;

        loop {
            let op = match &self.current_token {
                Some((_, token, _)) => matcher(token),
                None => None,
            };

            let Some(op) = op else { break };

            self.step();

            let right = next(self)?;
            let location = SrcSpan {
                start: left.location().start,
                end: right.location().end
            };

            left = Expression::Binary(Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                location
            });
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expression, ParseError> {
        let (start, op) = match &self.current_token {
            Some((start, Token::Plus, _)) => (*start, UnaryOp::Pos),
            Some((start, Token::Minus, _)) => (*start, UnaryOp::Neg),
            Some((start, Token::Tilde, _)) => (*start, UnaryOp::BitNot),
            _ => return self.parse_power(),
        };

        self.step();

        // `- - x` stacks
        let operand = self.parse_unary()?;
        let location = SrcSpan { start, end: operand.location().end };

        Ok(Expression::Unary(Unary {
            op,
            operand: Box::new(operand),
            location
        }))
    }

    // the base comes from `atom`, not `unary`, so `-a ** 2` is `-(a ** 2)`;
    // the exponent re-enters `unary`, which both permits `2 ** -3` and makes
    // `**` right-associative through the fallthrough back into this tier
    fn parse_power(&mut self) -> Result<Expression, ParseError> {
        let base = self.parse_atom()?;

        if !matches!(self.current_token, Some((_, Token::DoubleAsterisk, _))) {
            return Ok(base);
        }

        self.step();

        let exponent = self.parse_unary()?;
        let location = SrcSpan {
            start: base.location().start,
            end: exponent.location().end
        };

        Ok(Expression::Binary(Binary {
            op: BinaryOp::Pow,
            left: Box::new(base),
            right: Box::new(exponent),
            location
        }))
    }

    fn parse_atom(&mut self) -> Result<Expression, ParseError> {
        match self.next_token() {
            Some((start, Token::Ident(value), end)) => {
                Ok(Expression::Identifier((start, value, end).into()))
            },
            Some((start, Token::Int(value), end)) => {
                Ok(Expression::Primitive(Primitive::Int {
                    value,
                    location: SrcSpan { start, end }
                }))
            },
            Some((start, Token::Float(value), end)) => {
                Ok(Expression::Primitive(Primitive::Float {
                    value,
                    location: SrcSpan { start, end }
                }))
            },
            Some((start, Token::True, end)) => {
                Ok(Expression::Primitive(Primitive::Bool {
                    value: true,
                    location: SrcSpan { start, end }
                }))
            },
            Some((start, Token::False, end)) => {
                Ok(Expression::Primitive(Primitive::Bool {
                    value: false,
                    location: SrcSpan { start, end }
                }))
            },
            Some((start, Token::LParen, _)) => {
                let empty_end = match &self.current_token {
                    Some((_, Token::RParen, end)) => Some(*end),
                    _ => None,
                };

                if let Some(end) = empty_end {
                    self.step();

                    return Ok(Expression::Tuple(Tuple {
                        elements: vec![],
                        location: SrcSpan { start, end }
                    }));
                }

                // the inner expression comes back unwrapped; a comma before
                // `)` already produced a Tuple at the comma level
                let expression = self.parse_expression()?;

                match self.expect_one(Token::RParen) {
                    Ok(_) => Ok(expression),
                    Err(err) => parse_error(ParseErrorType::UnclosedParen, err.span),
                }
            },
            Some((start, Token::Eof, end)) => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start, end }
            ),
            Some((start, token, end)) => parse_error(
                ParseErrorType::UnexpectedToken {
                    token,
                    expected: vec!["an expression".to_string()],
                },
                SrcSpan { start, end }
            ),
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            ),
        }
    }
}

pub fn parse_source(src: &str) -> Result<Expression, ParseError> {
    parse_source_at(src, 0)
}

/// Parses one expression whose spans are offset into a larger source, for
/// front ends that evaluate a file line by line.
pub fn parse_source_at(src: &str, offset: u32) -> Result<Expression, ParseError> {
    let lexer = Lexer::new(src.char_indices().map(move |(i, c)| (offset + i as u32, c)));
    let mut parser = Parser::new(lexer);

    parser.parse()
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span })
}
