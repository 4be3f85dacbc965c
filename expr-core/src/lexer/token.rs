#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Ident(String),
    Int(i64),
    Float(f64),
    // `#` to end of line, collected by the parser, never part of the grammar
    Comment,

    // comparison operators
    Equal, // ==
    NotEqual, // !=
    LessThan, // <
    LessThanOrEqual, // <=
    GreaterThan, // >
    GreaterThanOrEqual, // >=

    // additive and multiplicative operators
    Plus, // +
    Minus, // -
    Asterisk, // *
    Slash, // /
    DoubleSlash, // //
    Percent, // %
    DoubleAsterisk, // **

    // bitwise operators
    ShiftLeft, // <<
    ShiftRight, // >>
    Ampersand, // &
    Caret, // ^
    Pipe, // |
    Tilde, // ~

    // assignment operators
    Assign, // =
    Walrus, // :=

    // keywords
    And,
    Or,
    Not,
    Is,
    In,
    If,
    Else,
    True,
    False,

    // delimiters
    Comma, // ,
    LParen, // (
    RParen, // )

    Eof,
}

impl Token {
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            Token::And
                | Token::Or
                | Token::Not
                | Token::Is
                | Token::In
                | Token::If
                | Token::Else
                | Token::True
                | Token::False
        )
    }

    /// Tokens that may begin an expression. The comma level uses this to
    /// tell a trailing comma from a further tuple element.
    pub fn starts_expression(&self) -> bool {
        matches!(
            self,
            Token::Ident(_)
                | Token::Int(_)
                | Token::Float(_)
                | Token::True
                | Token::False
                | Token::Not
                | Token::Plus
                | Token::Minus
                | Token::Tilde
                | Token::LParen
        )
    }

    pub fn as_literal(&self) -> String {
        match self {
            Token::Ident(value) => value.clone(),
            Token::Int(value) => format!("{value}"),
            Token::Float(value) => format!("{value}"),
            Token::Comment => "#".to_string(),

            Token::Equal => "==".to_string(),
            Token::NotEqual => "!=".to_string(),
            Token::LessThan => "<".to_string(),
            Token::LessThanOrEqual => "<=".to_string(),
            Token::GreaterThan => ">".to_string(),
            Token::GreaterThanOrEqual => ">=".to_string(),

            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Asterisk => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::DoubleSlash => "//".to_string(),
            Token::Percent => "%".to_string(),
            Token::DoubleAsterisk => "**".to_string(),

            Token::ShiftLeft => "<<".to_string(),
            Token::ShiftRight => ">>".to_string(),
            Token::Ampersand => "&".to_string(),
            Token::Caret => "^".to_string(),
            Token::Pipe => "|".to_string(),
            Token::Tilde => "~".to_string(),

            Token::Assign => "=".to_string(),
            Token::Walrus => ":=".to_string(),

            Token::And => "and".to_string(),
            Token::Or => "or".to_string(),
            Token::Not => "not".to_string(),
            Token::Is => "is".to_string(),
            Token::In => "in".to_string(),
            Token::If => "if".to_string(),
            Token::Else => "else".to_string(),
            Token::True => "True".to_string(),
            Token::False => "False".to_string(),

            Token::Comma => ",".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),

            Token::Eof => "\0".to_string(),
        }
    }
}
