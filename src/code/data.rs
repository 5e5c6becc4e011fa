use std::{
	fmt::{self, Display, Formatter},
	num::NonZeroU64,
};

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

use crate::error::{CodecError, Component};

use super::{
	names::{label_name, variable_name},
	pairing::{compose, decompose},
};

/// The raw `<a, <b, c>>` form of one program line.
///
/// `label` and `opcode` are exponents of two inside the code, so they are
/// bounded by its bit length and always fit in 64 bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
	pub label: u64,
	pub opcode: u64,
	pub operand: BigUint,
}

impl Triple {
	#[must_use]
	pub fn new<T>(label: u64, opcode: u64, operand: T) -> Self
	where
		T: Into<BigUint>,
	{
		Self {
			label,
			opcode,
			operand: operand.into(),
		}
	}

	/// # Errors
	///
	/// Returns `CodecError::Negative` if any component is below zero.
	/// Returns `CodecError::TooLarge` if the label or opcode needs more than 64 bits.
	pub fn from_signed(
		label: &BigInt,
		opcode: &BigInt,
		operand: &BigInt,
	) -> Result<Self, CodecError> {
		fn unsigned(component: Component, value: &BigInt) -> Result<BigUint, CodecError> {
			value.to_biguint().ok_or_else(|| CodecError::Negative {
				component,
				value: value.to_string(),
			})
		}

		fn exponent(component: Component, value: &BigInt) -> Result<u64, CodecError> {
			let value = unsigned(component, value)?;

			u64::try_from(&value).map_err(|_| CodecError::TooLarge {
				component,
				value: value.to_string(),
			})
		}

		Ok(Self {
			label: exponent(Component::Label, label)?,
			opcode: exponent(Component::Opcode, opcode)?,
			operand: unsigned(Component::Operand, operand)?,
		})
	}

	#[must_use]
	pub fn decode(code: &BigUint) -> Self {
		decompose(code)
	}

	#[must_use]
	pub fn encode(&self) -> BigUint {
		compose(self)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(NonZeroU64);

impl Label {
	#[must_use]
	pub const fn new(index: u64) -> Option<Self> {
		match NonZeroU64::new(index) {
			Some(index) => Some(Self(index)),
			None => None,
		}
	}

	#[must_use]
	pub const fn index(self) -> u64 {
		self.0.get()
	}
}

impl Display for Label {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(&label_name(self.index()))
	}
}

/// A register, numbered `Y = 1`, `X_k = 2k`, `Z_k = 2k + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Variable {
	Output,
	Input(BigUint),
	Local(BigUint),
}

impl Variable {
	#[must_use]
	pub fn from_index(index: &BigUint) -> Self {
		debug_assert!(!index.is_zero(), "variable indices start at 1");

		if index.is_one() {
			return Self::Output;
		}

		let suffix = index >> 1u32;

		if index.bit(0) {
			Self::Local(suffix)
		} else {
			Self::Input(suffix)
		}
	}

	#[must_use]
	pub fn from_operand(operand: &BigUint) -> Self {
		Self::from_index(&(operand + 1u32))
	}

	#[must_use]
	pub fn index(&self) -> BigUint {
		match self {
			Self::Output => BigUint::one(),
			Self::Input(k) => k << 1u32,
			Self::Local(k) => (k << 1u32) + 1u32,
		}
	}

	#[must_use]
	pub fn operand(&self) -> BigUint {
		self.index() - 1u32
	}
}

impl Display for Variable {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(&variable_name(&self.index()))
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
	Assign,
	Increment,
	Decrement,
	JumpIfNonZero(Label),
}

impl Operation {
	#[must_use]
	pub fn from_opcode(opcode: u64) -> Self {
		match opcode {
			0 => Self::Assign,
			1 => Self::Increment,
			2 => Self::Decrement,
			_ => match Label::new(opcode - 2) {
				Some(target) => Self::JumpIfNonZero(target),
				None => unreachable!("opcode {opcode} is above 2"),
			},
		}
	}

	#[must_use]
	pub const fn opcode(self) -> u64 {
		match self {
			Self::Assign => 0,
			Self::Increment => 1,
			Self::Decrement => 2,
			Self::JumpIfNonZero(target) => target.index() + 2,
		}
	}
}

/// One decoded program line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Instruction {
	pub label: Option<Label>,
	pub operation: Operation,
	pub variable: Variable,
}

impl Instruction {
	#[must_use]
	pub fn decode(code: &BigUint) -> Self {
		Triple::decode(code).into()
	}

	#[must_use]
	pub fn encode(&self) -> BigUint {
		Triple::from(self).encode()
	}
}

impl From<Triple> for Instruction {
	fn from(triple: Triple) -> Self {
		Self {
			label: Label::new(triple.label),
			operation: Operation::from_opcode(triple.opcode),
			variable: Variable::from_operand(&triple.operand),
		}
	}
}

impl From<&Instruction> for Triple {
	fn from(instruction: &Instruction) -> Self {
		Self {
			label: instruction.label.map_or(0, Label::index),
			opcode: instruction.operation.opcode(),
			operand: instruction.variable.operand(),
		}
	}
}
