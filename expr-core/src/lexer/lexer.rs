use super::error::{LexicalError, LexicalErrorType};
use super::token::Token;
use crate::utils::prelude::SrcSpan;

pub type Spanned = (u32, Token, u32);
pub type LexResult = std::result::Result<Spanned, LexicalError>;

pub fn str_to_keyword(word: &str) -> Option<Token> {
	Some(match word {
		"and" => Token::And,
		"or" => Token::Or,
		"not" => Token::Not,
		"is" => Token::Is,
		"in" => Token::In,
		"if" => Token::If,
		"else" => Token::Else,
		"True" => Token::True,
		"False" => Token::False,
		_ => return None
	})
}

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	position: u32,
	next_position: u32,
	ch: Option<char>,
	next_ch: Option<char>,
	input: T,
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
        let mut lexer = Self {
            position: 0,
            next_position: 0,
            ch: None,
            next_ch: None,
            input,
        };

        lexer.next_char();
        lexer.next_char();

        lexer
    }

    pub fn next_token(&mut self) -> LexResult {
		let span = match self.ch {
			Some(ch) => match ch {
				'#' => return Ok(self.lex_comment()),
				'(' => self.eat_one_char(Token::LParen),
				')' => self.eat_one_char(Token::RParen),
				',' => self.eat_one_char(Token::Comma),
				'~' => self.eat_one_char(Token::Tilde),
				'^' => self.eat_one_char(Token::Caret),
				'|' => self.eat_one_char(Token::Pipe),
				'&' => self.eat_one_char(Token::Ampersand),
				'%' => self.eat_one_char(Token::Percent),
				'+' => self.eat_one_char(Token::Plus),
				'-' => self.eat_one_char(Token::Minus),
				'*' => self.eat_one_or_pair('*', Token::DoubleAsterisk, Token::Asterisk),
				'/' => self.eat_one_or_pair('/', Token::DoubleSlash, Token::Slash),
				'=' => self.eat_one_or_pair('=', Token::Equal, Token::Assign),
				'<' => match self.next_ch {
					Some('<') => self.eat_two_chars(Token::ShiftLeft),
					Some('=') => self.eat_two_chars(Token::LessThanOrEqual),
					_ => self.eat_one_char(Token::LessThan),
				},
				'>' => match self.next_ch {
					Some('>') => self.eat_two_chars(Token::ShiftRight),
					Some('=') => self.eat_two_chars(Token::GreaterThanOrEqual),
					_ => self.eat_one_char(Token::GreaterThan),
				},
				'!' => match self.next_ch {
					Some('=') => self.eat_two_chars(Token::NotEqual),
					_ => return self.unrecognized('!'),
				},
				':' => match self.next_ch {
					Some('=') => self.eat_two_chars(Token::Walrus),
					_ => return self.unrecognized(':'),
				},
				'a'..='z' | 'A'..='Z' | '_' => {
					return Ok(self.lex_ident());
				},
				'0'..='9' | '.' => {
					return self.lex_number();
				},
				' ' | '\t' | '\r' | '\n' | '\x0C' => {
					self.next_char();
					return self.next_token();
				},
				c => return self.unrecognized(c),
			},
			None => self.eat_one_char(Token::Eof),
		};

		Ok(span)
    }

	fn unrecognized(&mut self, tok: char) -> LexResult {
		let start = self.position;
		self.next_char();

		Err(LexicalError {
			error: LexicalErrorType::UnrecognizedToken { tok },
			location: SrcSpan { start, end: self.position },
		})
	}

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch;

		let next = match self.input.next() {
			Some((pos, ch)) => {
				self.position = self.next_position;
				self.next_position = pos;

				Some(ch)
			},
			None => {
				self.position = self.next_position;
				self.next_position += 1;

				None
			}
		};

		self.ch = self.next_ch;
		self.next_ch = next;

		ch
	}

	fn eat_one_char(&mut self, token: Token) -> Spanned {
		let start_pos = self.position;
		self.next_char();
		let end_pos = self.position;

		(start_pos, token, end_pos)
	}

	fn eat_two_chars(&mut self, token: Token) -> Spanned {
		let start_pos = self.position;
		self.next_char();
		self.next_char();
		let end_pos = self.position;

		(start_pos, token, end_pos)
	}

	fn eat_one_or_pair(&mut self, pair: char, double: Token, single: Token) -> Spanned {
		if self.next_ch == Some(pair) {
			self.eat_two_chars(double)
		} else {
			self.eat_one_char(single)
		}
	}

	fn lex_ident(&mut self) -> Spanned {
		let start_pos = self.position;
		let mut ident = String::new();

		while let Some(ch) = self.ch {
			if ch.is_ascii_alphanumeric() || ch == '_' {
				ident.push(ch);
				self.next_char();
			} else {
				break;
			}
		}

		let end_pos = self.position;

		let token = match str_to_keyword(&ident) {
			Some(token) => token,
			None => Token::Ident(ident),
		};

		(start_pos, token, end_pos)
	}

	fn lex_number(&mut self) -> LexResult {
		if self.ch == Some('0') && matches!(self.next_ch, Some('x' | 'X' | 'o' | 'O' | 'b' | 'B')) {
			return self.lex_radix_number();
		}

		let start_pos = self.position;
		let mut value = String::new();
		let mut is_float = false;

		self.gather_digits(&mut value);

		if self.ch == Some('.') {
			is_float = true;
			value.push(self.next_char().unwrap_or('.'));
			self.gather_digits(&mut value);
		}

		if matches!(self.ch, Some('e' | 'E')) {
			is_float = true;
			value.push(self.next_char().unwrap_or('e'));

			if matches!(self.ch, Some('+' | '-')) {
				value.push(self.next_char().unwrap_or('+'));
			}

			if !matches!(self.ch, Some(ch) if ch.is_ascii_digit()) {
				return Err(LexicalError {
					error: LexicalErrorType::MissingDigitsAfterExponent,
					location: SrcSpan::from(start_pos, self.position),
				});
			}

			self.gather_digits(&mut value);
		}

		let end_pos = self.position;

		let token = if is_float {
			match value.parse::<f64>() {
				Ok(value) => Token::Float(value),
				// only a lone `.` reaches here
				Err(_) => return Err(LexicalError {
					error: LexicalErrorType::UnrecognizedToken { tok: '.' },
					location: SrcSpan::from(start_pos, end_pos),
				}),
			}
		} else {
			match value.parse::<i64>() {
				Ok(value) => Token::Int(value),
				Err(_) => return Err(LexicalError {
					error: LexicalErrorType::IntegerLiteralTooLarge,
					location: SrcSpan::from(start_pos, end_pos),
				}),
			}
		};

		Ok((start_pos, token, end_pos))
	}

	fn gather_digits(&mut self, value: &mut String) {
		while let Some(ch) = self.ch {
			if ch.is_ascii_digit() {
				value.push(ch);
				self.next_char();
			} else {
				break;
			}
		}
	}

	fn lex_radix_number(&mut self) -> LexResult {
		let start_pos = self.position;

		self.next_char();
		let radix = match self.next_char() {
			Some('x' | 'X') => 16,
			Some('o' | 'O') => 8,
			_ => 2,
		};

		let mut value = String::new();

		while let Some(ch) = self.ch {
			if ch.is_ascii_alphanumeric() {
				value.push(ch);
				self.next_char();
			} else {
				break;
			}
		}

		let end_pos = self.position;
		let location = SrcSpan::from(start_pos, end_pos);

		if value.is_empty() {
			return Err(LexicalError {
				error: LexicalErrorType::EmptyRadixLiteral { radix },
				location,
			});
		}

		match i64::from_str_radix(&value, radix) {
			Ok(value) => Ok((start_pos, Token::Int(value), end_pos)),
			Err(err) => {
				let error = match err.kind() {
					std::num::IntErrorKind::PosOverflow => LexicalErrorType::IntegerLiteralTooLarge,
					_ => LexicalErrorType::DigitOutOfRadix { radix },
				};

				Err(LexicalError { error, location })
			}
		}
	}

	fn lex_comment(&mut self) -> Spanned {
		let start_pos = self.position;

		while !matches!(self.ch, Some('\n') | None) {
			self.next_char();
		}

		(start_pos, Token::Comment, self.position)
	}
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = LexResult;

	fn next(&mut self) -> Option<Self::Item> {
		Some(self.next_token())
	}
}
