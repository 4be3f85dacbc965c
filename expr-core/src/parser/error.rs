use crate::{lexer::prelude::{LexicalError, Token}, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    EmptyInput,
    UnexpectedEof,
    UnexpectedToken {
        token: Token,
        expected: Vec<String>,
    },
    UnclosedParen,
    ExpectedElse,
    InvalidAssignmentTarget,
    LexError { error: LexicalError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan
}

impl ParseError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            ParseErrorType::EmptyInput => ("Expected an expression, got empty input", vec![]),
            ParseErrorType::UnexpectedEof => ("Unexpected end of input", vec![]),
            ParseErrorType::UnclosedParen => ("Missing closing `)`", vec![]),
            ParseErrorType::ExpectedElse => ("Conditional expression is missing its `else` branch", vec![]),
            ParseErrorType::InvalidAssignmentTarget => ("Assignment target must be a bare identifier", vec![]),
            ParseErrorType::UnexpectedToken { token, expected } => {
                let found = match token {
                    Token::Int(_) => "an integer".to_string(),
                    Token::Float(_) => "a float".to_string(),
                    Token::Ident(_) => "an identifier".to_string(),
                    Token::Eof => "end of input".to_string(),
                    _ if token.is_keyword() => format!("the keyword `{}`", token.as_literal()),
                    _ => format!("`{}`", token.as_literal())
                };

                ("Unexpected token", vec![
                    format!("Expected {}, found {}", expected.join(" or "), found)
                ])
            },
            ParseErrorType::LexError { error } => error.details(),
        }
    }
}
