use std::{iter::Peekable, str::SplitWhitespace};

use crate::error::ParseError;

use super::{
	data::{Instruction, Label, Operation, Variable},
	names::{label_index, variable_index},
};

pub type ParseResult<T> = Result<T, ParseError>;

struct Tokens<'a> {
	inner: Peekable<SplitWhitespace<'a>>,
	line: usize,
}

impl<'a> Tokens<'a> {
	fn new(text: &'a str, line: usize) -> Self {
		Self {
			inner: text.split_whitespace().peekable(),
			line,
		}
	}

	fn next(&mut self) -> ParseResult<&'a str> {
		self.inner
			.next()
			.ok_or(ParseError::Truncated { line: self.line })
	}

	fn expect(&mut self, wanted: &str) -> ParseResult<()> {
		let token = self.next()?;

		if token == wanted {
			Ok(())
		} else {
			Err(self.unexpected(token))
		}
	}

	fn unexpected(&self, token: &str) -> ParseError {
		ParseError::Unexpected {
			line: self.line,
			token: token.to_string(),
		}
	}

	fn label(&self, name: &str) -> ParseResult<Label> {
		label_index(name)
			.and_then(Label::new)
			.ok_or_else(|| ParseError::BadLabel {
				line: self.line,
				name: name.to_string(),
			})
	}

	fn variable(&mut self) -> ParseResult<Variable> {
		let name = self.next()?;

		variable_index(name)
			.map(|index| Variable::from_index(&index))
			.ok_or_else(|| ParseError::BadVariable {
				line: self.line,
				name: name.to_string(),
			})
	}

	fn finish(&mut self) -> ParseResult<()> {
		match self.inner.next() {
			Some(token) => Err(self.unexpected(token)),
			None => Ok(()),
		}
	}
}

fn parse_prefix(tokens: &mut Tokens) -> ParseResult<Option<Label>> {
	let Some(&token) = tokens.inner.peek() else {
		return Err(ParseError::Truncated { line: tokens.line });
	};

	let Some(name) = token.strip_prefix('[') else {
		return Ok(None);
	};

	tokens.inner.next();

	let name = name
		.strip_suffix(']')
		.ok_or_else(|| tokens.unexpected(token))?;

	tokens.label(name).map(Some)
}

fn parse_jump(tokens: &mut Tokens) -> ParseResult<(Operation, Variable)> {
	let variable = tokens.variable()?;

	tokens.expect("!=")?;
	tokens.expect("0")?;
	tokens.expect("GOTO")?;

	let target = tokens.next()?;
	let target = tokens.label(target)?;

	Ok((Operation::JumpIfNonZero(target), variable))
}

fn parse_assignment(tokens: &mut Tokens) -> ParseResult<(Operation, Variable)> {
	let variable = tokens.variable()?;

	tokens.expect("<-")?;

	let source = tokens.variable()?;

	if source != variable {
		return Err(ParseError::Mismatch {
			line: tokens.line,
			left: variable.to_string(),
			right: source.to_string(),
		});
	}

	let operation = match tokens.inner.next() {
		None => return Ok((Operation::Assign, variable)),
		Some("+") => Operation::Increment,
		Some("-") => Operation::Decrement,
		Some(token) => return Err(tokens.unexpected(token)),
	};

	tokens.expect("1")?;

	Ok((operation, variable))
}

fn parse_tokens(tokens: &mut Tokens) -> ParseResult<Instruction> {
	let label = parse_prefix(tokens)?;

	let (operation, variable) = if tokens.inner.peek() == Some(&"IF") {
		tokens.inner.next();

		parse_jump(tokens)?
	} else {
		parse_assignment(tokens)?
	};

	tokens.finish()?;

	Ok(Instruction {
		label,
		operation,
		variable,
	})
}

/// Parses one instruction written the way [`Instruction`]'s `Display` prints it.
///
/// # Errors
///
/// Returns a `ParseError` carrying `line` if the text is not one of the four
/// instruction forms.
pub fn parse_instruction(text: &str, line: usize) -> ParseResult<Instruction> {
	parse_tokens(&mut Tokens::new(text, line))
}

/// Parses one instruction per non-blank line.
///
/// # Errors
///
/// Returns the first `ParseError` encountered.
pub fn parse_listing(text: &str) -> ParseResult<Vec<Instruction>> {
	text.lines()
		.enumerate()
		.filter(|(_, line)| !line.trim().is_empty())
		.map(|(i, line)| parse_instruction(line, i + 1))
		.collect()
}

#[cfg(test)]
mod tests {
	use num_bigint::BigUint;

	use super::{parse_instruction, parse_listing};
	use crate::{
		code::data::{Instruction, Label, Operation, Variable},
		error::ParseError,
	};

	#[test]
	fn parses_the_four_forms() {
		let x1 = Variable::Input(1u32.into());
		let parse = |text: &str| parse_instruction(text, 1).unwrap();

		assert_eq!(parse("Y <- Y").operation, Operation::Assign);
		assert_eq!(parse("X1 <- X1 + 1").operation, Operation::Increment);
		assert_eq!(parse("Z2 <- Z2 - 1").variable, Variable::Local(2u32.into()));

		let jump = parse("[E1] IF X1 != 0 GOTO A2");

		assert_eq!(
			jump,
			Instruction {
				label: Label::new(5),
				operation: Operation::JumpIfNonZero(Label::new(6).unwrap()),
				variable: x1,
			}
		);
	}

	#[test]
	fn listing_encodes_to_known_codes() {
		let text = "[A1] X1 <- X1 - 1\nZ2 <- Z2 + 1\n\nIF X3 != 0 GOTO B1\nY <- Y + 1\nIF X1 != 0 GOTO A1\n";
		let codes: Vec<_> = parse_listing(text)
			.unwrap()
			.iter()
			.map(Instruction::encode)
			.collect();
		let expected: Vec<_> = [45u32, 34, 350, 2, 46]
			.into_iter()
			.map(BigUint::from)
			.collect();

		assert_eq!(codes, expected);
	}

	#[test]
	fn reports_problems_with_line_numbers() {
		assert_eq!(
			parse_instruction("X1 <- Z1 + 1", 3),
			Err(ParseError::Mismatch {
				line: 3,
				left: "X1".into(),
				right: "Z1".into(),
			})
		);
		assert_eq!(
			parse_instruction("[F1] Y <- Y", 2),
			Err(ParseError::BadLabel {
				line: 2,
				name: "F1".into(),
			})
		);
		assert_eq!(
			parse_instruction("IF X1 != 0", 4),
			Err(ParseError::Truncated { line: 4 })
		);
		assert_eq!(
			parse_instruction("Y <- Y * 2", 1),
			Err(ParseError::Unexpected {
				line: 1,
				token: "*".into(),
			})
		);
		assert_eq!(
			parse_listing("Y <- Y\nQ1 <- Q1\n"),
			Err(ParseError::BadVariable {
				line: 2,
				name: "Q1".into(),
			})
		);
	}
}
