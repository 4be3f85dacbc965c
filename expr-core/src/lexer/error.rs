use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorType {
    UnrecognizedToken { tok: char },
    DigitOutOfRadix { radix: u32 },
    EmptyRadixLiteral { radix: u32 },
    IntegerLiteralTooLarge,
    MissingDigitsAfterExponent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: SrcSpan
}

impl LexicalError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self.error {
            LexicalErrorType::UnrecognizedToken { tok } => {
                ("Unrecognized character", vec![format!("`{tok}` cannot start a token")])
            },
            LexicalErrorType::DigitOutOfRadix { radix } => {
                ("Invalid digit for this radix", vec![format!("digits must fit radix {radix}")])
            },
            LexicalErrorType::EmptyRadixLiteral { radix } => {
                ("Radix prefix with no digits", vec![format!("expected radix {radix} digits after the prefix")])
            },
            LexicalErrorType::IntegerLiteralTooLarge => {
                ("Integer literal too large", vec!["integers are limited to 64 bits".to_string()])
            },
            LexicalErrorType::MissingDigitsAfterExponent => {
                ("Missing digits after exponent", vec![])
            },
        }
    }
}
