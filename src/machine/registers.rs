use num_bigint::BigUint;
use num_traits::Zero;

use crate::code::data::Variable;

/// The register environment, laid out as `X1..Xn, Z1..Zm, Y`.
///
/// Only registers up to the highest index a program mentions exist; there is
/// no column for anything past them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registers {
	names: Box<[Variable]>,
	values: Vec<BigUint>,
	inputs: usize,
}

impl Registers {
	/// Creates `inputs` X registers and `locals` Z registers plus `Y`, all zero.
	#[must_use]
	pub fn new(inputs: usize, locals: usize) -> Self {
		let x = (1..=inputs).map(|k| Variable::Input(k.into()));
		let z = (1..=locals).map(|k| Variable::Local(k.into()));
		let names: Box<[Variable]> = x.chain(z).chain([Variable::Output]).collect();
		let values = vec![BigUint::zero(); names.len()];

		Self {
			names,
			values,
			inputs,
		}
	}

	/// Binds `X1, X2, ...` to the given values in order, returning how many
	/// values had no register to go to.
	pub fn bind_inputs(&mut self, inputs: &[BigUint]) -> usize {
		let bound = inputs.len().min(self.inputs);

		self.values[..bound].clone_from_slice(&inputs[..bound]);

		inputs.len() - bound
	}

	#[must_use]
	pub fn slot(&self, variable: &Variable) -> Option<usize> {
		let locals = self.names.len() - self.inputs - 1;
		let within = |k: &BigUint, len: usize| {
			usize::try_from(k)
				.ok()
				.filter(|&k| (1..=len).contains(&k))
		};

		match variable {
			Variable::Output => Some(self.names.len() - 1),
			Variable::Input(k) => within(k, self.inputs).map(|k| k - 1),
			Variable::Local(k) => within(k, locals).map(|k| self.inputs + k - 1),
		}
	}

	#[must_use]
	pub fn names(&self) -> &[Variable] {
		&self.names
	}

	#[must_use]
	pub fn values(&self) -> &[BigUint] {
		&self.values
	}

	#[must_use]
	pub fn get(&self, variable: &Variable) -> Option<&BigUint> {
		self.slot(variable).map(|slot| &self.values[slot])
	}

	#[must_use]
	pub fn is_zero(&self, slot: usize) -> bool {
		self.values[slot].is_zero()
	}

	pub fn increment(&mut self, slot: usize) {
		self.values[slot] += 1u32;
	}

	/// Decrements the register unless it is already zero.
	pub fn decrement(&mut self, slot: usize) {
		if !self.is_zero(slot) {
			self.values[slot] -= 1u32;
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = (&Variable, &BigUint)> {
		self.names.iter().zip(&self.values)
	}
}
