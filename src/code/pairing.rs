//! The pairing function `<x, y> = 2^x (2y + 1) - 1`, nested as `<a, <b, c>>`.

use num_bigint::BigUint;

use super::data::Triple;

// Splits `n + 1` into `2^x * odd` and returns `(x, (odd - 1) / 2)`.
fn unpair(n: BigUint) -> (u64, BigUint) {
	let n = n + 1u32;
	let x = n.trailing_zeros().unwrap_or_default();
	let odd: BigUint = n >> x;

	(x, odd >> 1u32)
}

fn pair(x: u64, y: BigUint) -> BigUint {
	let odd = (y << 1u32) + 1u32;

	(odd << x) - 1u32
}

/// Decodes an instruction code into its `<a, <b, c>>` triple. Every code decodes.
#[must_use]
pub fn decompose(code: &BigUint) -> Triple {
	let (label, rest) = unpair(code.clone());
	let (opcode, operand) = unpair(rest);

	Triple {
		label,
		opcode,
		operand,
	}
}

/// Encodes a triple as `2^a (2 (2^b (2c + 1) - 1) + 1) - 1`.
#[must_use]
pub fn compose(triple: &Triple) -> BigUint {
	let inner = pair(triple.opcode, triple.operand.clone());

	pair(triple.label, inner)
}

#[cfg(test)]
mod tests {
	use num_bigint::BigUint;

	use super::{compose, decompose};
	use crate::code::data::Triple;

	#[test]
	fn decodes_the_textbook_example() {
		let triple = decompose(&BigUint::from(21u32));

		assert_eq!(triple, Triple::new(1, 1, 1u32));
	}

	#[test]
	fn zero_is_the_unlabeled_output_no_op() {
		assert_eq!(decompose(&BigUint::default()), Triple::new(0, 0, 0u32));
	}

	#[test]
	fn decodes_the_sample_program() {
		let codes = [45u32, 34, 350, 2, 46];
		let expected = [
			Triple::new(1, 2, 1u32),
			Triple::new(0, 1, 4u32),
			Triple::new(0, 4, 5u32),
			Triple::new(0, 1, 0u32),
			Triple::new(0, 3, 1u32),
		];

		for (code, triple) in codes.into_iter().zip(expected) {
			assert_eq!(decompose(&BigUint::from(code)), triple, "code {code}");
		}
	}

	#[test]
	fn composes_beyond_machine_words() {
		let triple = Triple::new(70, 90, 12345u32);
		let code = compose(&triple);

		assert!(code.bits() > 128);
		assert_eq!(decompose(&code), triple);
	}
}
