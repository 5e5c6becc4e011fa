use std::{
	fmt::{self, Display, Formatter},
	io::{Result, Write},
};

use num_bigint::BigUint;

use crate::code::data::{Instruction, Operation};

impl Display for Instruction {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let var = &self.variable;

		if let Some(label) = self.label {
			write!(f, "[{label}] ")?;
		}

		match self.operation {
			Operation::Assign => write!(f, "{var} <- {var}"),
			Operation::Increment => write!(f, "{var} <- {var} + 1"),
			Operation::Decrement => write!(f, "{var} <- {var} - 1"),
			Operation::JumpIfNonZero(target) => write!(f, "IF {var} != 0 GOTO {target}"),
		}
	}
}

/// Writes the decoded form of each code on its own line.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write(writer: &mut dyn Write, codes: &[BigUint]) -> Result<()> {
	codes.iter().try_for_each(|code| {
		let instruction = Instruction::decode(code);

		writeln!(writer, "{instruction}")
	})
}

#[cfg(test)]
mod tests {
	use num_bigint::BigUint;

	use super::write;
	use crate::code::data::{Instruction, Triple};

	fn format(label: u64, opcode: u64, operand: u32) -> String {
		Instruction::from(Triple::new(label, opcode, operand)).to_string()
	}

	#[test]
	fn formats_every_shape() {
		assert_eq!(format(1, 1, 1), "[A1] X1 <- X1 + 1");
		assert_eq!(format(0, 0, 0), "Y <- Y");
		assert_eq!(format(0, 2, 2), "Z1 <- Z1 - 1");
		assert_eq!(format(6, 0, 3), "[A2] X2 <- X2");
		assert_eq!(format(0, 3, 1), "IF X1 != 0 GOTO A1");
		assert_eq!(format(5, 7, 0), "[E1] IF Y != 0 GOTO E1");
	}

	#[test]
	fn jump_targets_need_not_exist() {
		assert_eq!(format(0, 2 + 23, 4), "IF Z2 != 0 GOTO C5");
	}

	#[test]
	fn writes_one_line_per_code() {
		let codes: Vec<_> = [45u32, 34, 350, 2, 46]
			.into_iter()
			.map(BigUint::from)
			.collect();
		let mut buffer = Vec::new();

		write(&mut buffer, &codes).unwrap();

		let text = String::from_utf8(buffer).unwrap();
		let expected = "\
[A1] X1 <- X1 - 1
Z2 <- Z2 + 1
IF X3 != 0 GOTO B1
Y <- Y + 1
IF X1 != 0 GOTO A1
";

		assert_eq!(text, expected);
	}
}
