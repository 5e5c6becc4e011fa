//! Bijections between indices and the names used in Davis's language.
//!
//! Labels run `A1 B1 C1 D1 E1 A2 ...` from index 1. Variables run
//! `Y X1 Z1 X2 Z2 ...` from index 1, so `X` takes the even indices and `Z`
//! the odd ones above 1.

use num_bigint::BigUint;
use num_traits::{One, Zero};

pub static LABEL_FAMILIES: [char; 5] = ['A', 'B', 'C', 'D', 'E'];
pub static VARIABLE_FAMILIES: [char; 2] = ['X', 'Z'];
pub static OUTPUT: &str = "Y";

/// Name of the label with 1-based index `n`.
#[must_use]
pub fn label_name(n: u64) -> String {
	debug_assert!(n != 0, "label indices start at 1");

	let len = LABEL_FAMILIES.len() as u64;
	let (row, column) = (n / len, n % len);

	if column == 0 {
		format!("{}{row}", LABEL_FAMILIES[LABEL_FAMILIES.len() - 1])
	} else {
		let family = LABEL_FAMILIES[(column - 1) as usize];

		format!("{family}{}", row + 1)
	}
}

/// Name of the variable with 1-based index `n`.
#[must_use]
pub fn variable_name(n: &BigUint) -> String {
	debug_assert!(!n.is_zero(), "variable indices start at 1");

	if n.is_one() {
		return OUTPUT.to_string();
	}

	let suffix = n >> 1u32;
	let family = VARIABLE_FAMILIES[usize::from(n.bit(0))];

	format!("{family}{suffix}")
}

fn split_name(name: &str) -> Option<(char, BigUint)> {
	let mut chars = name.chars();
	let family = chars.next()?;
	let digits = chars.as_str();

	if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}

	let row: BigUint = digits.parse().ok()?;

	(!row.is_zero()).then_some((family, row))
}

/// Index of a label name, the inverse of [`label_name`].
#[must_use]
pub fn label_index(name: &str) -> Option<u64> {
	let (family, row) = split_name(name)?;
	let column = LABEL_FAMILIES.iter().position(|&c| c == family)? as u64;
	let row = u64::try_from(row).ok()?;

	// Jump opcodes are the label index plus two.
	(row - 1)
		.checked_mul(LABEL_FAMILIES.len() as u64)?
		.checked_add(column + 1)
		.filter(|&n| n <= u64::MAX - 2)
}

/// Index of a variable name, the inverse of [`variable_name`].
#[must_use]
pub fn variable_index(name: &str) -> Option<BigUint> {
	if name == OUTPUT {
		return Some(BigUint::one());
	}

	let (family, suffix) = split_name(name)?;
	let parity = VARIABLE_FAMILIES.iter().position(|&c| c == family)?;

	Some((suffix << 1u32) + parity)
}

#[cfg(test)]
mod tests {
	use num_bigint::BigUint;

	use super::{label_index, label_name, variable_index, variable_name};

	#[test]
	fn labels_wrap_every_five() {
		assert_eq!(label_name(1), "A1");
		assert_eq!(label_name(4), "D1");
		assert_eq!(label_name(5), "E1");
		assert_eq!(label_name(6), "A2");
		assert_eq!(label_name(10), "E2");
		assert_eq!(label_name(13), "C3");
	}

	#[test]
	fn variables_alternate_after_output() {
		let names: Vec<_> = (1u32..=6)
			.map(|n| variable_name(&BigUint::from(n)))
			.collect();

		assert_eq!(names, ["Y", "X1", "Z1", "X2", "Z2", "X3"]);
	}

	#[test]
	fn label_names_parse_back() {
		for n in 1..=50 {
			assert_eq!(label_index(&label_name(n)), Some(n));
		}
	}

	#[test]
	fn rejects_malformed_names() {
		assert_eq!(label_index("A0"), None);
		assert_eq!(label_index("F1"), None);
		assert_eq!(label_index("A"), None);
		assert_eq!(label_index("A-1"), None);
		assert_eq!(variable_index("X0"), None);
		assert_eq!(variable_index("W3"), None);
		assert_eq!(variable_index("Y1"), None);
	}

	#[test]
	fn variable_names_parse_back() {
		assert_eq!(variable_index("Y"), Some(BigUint::from(1u32)));
		assert_eq!(variable_index("X1"), Some(BigUint::from(2u32)));
		assert_eq!(variable_index("Z1"), Some(BigUint::from(3u32)));
		assert_eq!(variable_index("X2"), Some(BigUint::from(4u32)));
	}
}
