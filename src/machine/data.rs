use std::collections::HashMap;

use num_bigint::BigUint;

use crate::code::data::{Instruction, Label};

use super::registers::Registers;

/// A decoded line together with the register slot its variable lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
	pub instruction: Instruction,
	pub slot: usize,
}

/// A program ready to run: its lines, where each label points, and the
/// starting register environment.
#[derive(Debug, Clone)]
pub struct Program {
	lines: Box<[Line]>,
	labels: HashMap<Label, usize>,
	registers: Registers,
}

impl Program {
	#[must_use]
	pub const fn new(lines: Box<[Line]>, labels: HashMap<Label, usize>, registers: Registers) -> Self {
		Self {
			lines,
			labels,
			registers,
		}
	}

	#[must_use]
	pub fn lines(&self) -> &[Line] {
		&self.lines
	}

	/// The 1-based line carrying `label`, if any.
	#[must_use]
	pub fn target(&self, label: Label) -> Option<usize> {
		self.labels.get(&label).copied()
	}

	#[must_use]
	pub const fn labels(&self) -> &HashMap<Label, usize> {
		&self.labels
	}

	#[must_use]
	pub const fn registers(&self) -> &Registers {
		&self.registers
	}
}

/// The machine state after a step: the line to run next and every register value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
	pub pointer: usize,
	pub values: Vec<BigUint>,
}
