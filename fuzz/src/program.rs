use arbitrary::{Arbitrary, Error, Result, Unstructured};
use davis::code::data::{Instruction, Label, Operation, Variable};
use num_bigint::BigUint;

// Small indices keep the environment and label space dense enough for jumps to land.
static MAX_LABEL: u64 = 12;
static MAX_SUFFIX: u32 = 4;

#[derive(Arbitrary)]
enum Shape {
	Assign,
	Increment,
	Decrement,
	Jump,
}

fn label(u: &mut Unstructured) -> Result<Label> {
	let index = u.int_in_range(1..=MAX_LABEL)?;

	Label::new(index).ok_or(Error::IncorrectFormat)
}

fn variable(u: &mut Unstructured) -> Result<Variable> {
	let suffix = BigUint::from(u.int_in_range(1..=MAX_SUFFIX)?);
	let variable = match u.int_in_range(0..=2)? {
		0 => Variable::Output,
		1 => Variable::Input(suffix),
		_ => Variable::Local(suffix),
	};

	Ok(variable)
}

fn instruction(u: &mut Unstructured) -> Result<Instruction> {
	let label = if u.arbitrary()? { Some(label(u)?) } else { None };
	let operation = match Shape::arbitrary(u)? {
		Shape::Assign => Operation::Assign,
		Shape::Increment => Operation::Increment,
		Shape::Decrement => Operation::Decrement,
		Shape::Jump => Operation::JumpIfNonZero(label(u)?),
	};

	Ok(Instruction {
		label,
		operation,
		variable: variable(u)?,
	})
}

/// Codes of a well-formed program plus its input values.
#[derive(Debug)]
pub struct Program {
	pub codes: Vec<BigUint>,
	pub inputs: Vec<BigUint>,
}

impl Arbitrary<'_> for Program {
	fn arbitrary(u: &mut Unstructured) -> Result<Self> {
		let len = u.arbitrary_len::<Shape>()?;
		let mut codes = Vec::with_capacity(len);

		for _ in 0..len {
			codes.push(instruction(u)?.encode());
		}

		let inputs = Vec::<u8>::arbitrary(u)?
			.into_iter()
			.map(BigUint::from)
			.collect();

		Ok(Self { codes, inputs })
	}
}
