use std::collections::{hash_map::Entry, HashMap};

use log::{debug, warn};
use num_bigint::BigUint;
use num_traits::Zero;

use crate::{
	code::data::{Instruction, Label, Variable},
	error::LoadError,
};

use super::{
	data::{Line, Program},
	registers::Registers,
};

pub static DEFAULT_MAX_REGISTERS: usize = 4096;

pub struct Analyzer {
	max_registers: usize,

	labels: HashMap<Label, usize>,
	max_input: BigUint,
	max_local: BigUint,
}

impl Default for Analyzer {
	fn default() -> Self {
		Self::new(DEFAULT_MAX_REGISTERS)
	}
}

impl Analyzer {
	#[must_use]
	pub fn new(max_registers: usize) -> Self {
		Self {
			max_registers,
			labels: HashMap::new(),
			max_input: BigUint::zero(),
			max_local: BigUint::zero(),
		}
	}

	fn reset(&mut self) {
		self.labels.clear();
		self.max_input.set_zero();
		self.max_local.set_zero();
	}

	fn add_label(&mut self, label: Label, line: usize) -> Result<(), LoadError> {
		match self.labels.entry(label) {
			Entry::Occupied(entry) => Err(LoadError::DuplicateLabel {
				label: label.to_string(),
				first: *entry.get(),
				second: line,
			}),
			Entry::Vacant(entry) => {
				entry.insert(line);

				Ok(())
			}
		}
	}

	fn add_variable(&mut self, variable: &Variable) {
		let (max, k) = match variable {
			Variable::Output => return,
			Variable::Input(k) => (&mut self.max_input, k),
			Variable::Local(k) => (&mut self.max_local, k),
		};

		if *k > *max {
			max.clone_from(k);
		}
	}

	// Every register up to the highest X and Z index plus `Y` gets a column.
	fn count_registers(&self) -> Result<(usize, usize), LoadError> {
		let too_many = |variable: Variable| LoadError::TooManyRegisters {
			variable: variable.to_string(),
			limit: self.max_registers,
		};

		let inputs = usize::try_from(&self.max_input)
			.map_err(|_| too_many(Variable::Input(self.max_input.clone())))?;
		let locals = usize::try_from(&self.max_local)
			.map_err(|_| too_many(Variable::Local(self.max_local.clone())))?;

		let fits = inputs
			.checked_add(locals)
			.and_then(|n| n.checked_add(1))
			.is_some_and(|n| n <= self.max_registers);

		if fits {
			Ok((inputs, locals))
		} else if inputs >= locals {
			Err(too_many(Variable::Input(self.max_input.clone())))
		} else {
			Err(too_many(Variable::Local(self.max_local.clone())))
		}
	}

	/// Decodes every line, collects labels and sizes the register environment,
	/// binding `inputs` to `X1, X2, ...` in order.
	///
	/// # Errors
	///
	/// Returns `LoadError::DuplicateLabel` if two lines carry the same label.
	/// Returns `LoadError::TooManyRegisters` if the environment would exceed the register limit.
	pub fn build(&mut self, codes: &[BigUint], inputs: &[BigUint]) -> Result<Program, LoadError> {
		self.reset();

		let mut instructions = Vec::with_capacity(codes.len());

		for (i, code) in codes.iter().enumerate() {
			let instruction = Instruction::decode(code);

			if let Some(label) = instruction.label {
				self.add_label(label, i + 1)?;
			}

			self.add_variable(&instruction.variable);

			instructions.push(instruction);
		}

		let (input_count, local_count) = self.count_registers()?;
		let mut registers = Registers::new(input_count, local_count);
		let ignored = registers.bind_inputs(inputs);

		if ignored != 0 {
			warn!("{ignored} input value(s) past X{input_count} have no register and are ignored");
		}

		let lines = instructions
			.into_iter()
			.map(|instruction| {
				let slot = registers
					.slot(&instruction.variable)
					.expect("environment covers every referenced register");

				Line { instruction, slot }
			})
			.collect();

		debug!(
			"loaded {} line(s), {} label(s), {} register(s)",
			codes.len(),
			self.labels.len(),
			registers.names().len()
		);

		let labels = std::mem::take(&mut self.labels);

		Ok(Program::new(lines, labels, registers))
	}
}
