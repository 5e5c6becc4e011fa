use num_bigint::BigUint;

use crate::error::InputError;

/// Parses a line of whitespace-separated non-negative integers.
///
/// # Errors
///
/// Returns `InputError::NotAnInteger` with the 1-based position of the first
/// token that is not a non-negative decimal integer.
pub fn parse_numbers(line: &str) -> Result<Vec<BigUint>, InputError> {
	line.split_whitespace()
		.enumerate()
		.map(|(i, token)| {
			let digits = token.strip_prefix('+').unwrap_or(token);
			let not_an_integer = || InputError::NotAnInteger {
				position: i + 1,
				token: token.to_string(),
			};

			if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
				return Err(not_an_integer());
			}

			digits.parse().map_err(|_| not_an_integer())
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use num_bigint::BigUint;

	use super::parse_numbers;
	use crate::error::InputError;

	#[test]
	fn reads_arbitrarily_large_values() {
		let numbers = parse_numbers("  21 0\t+7 340282366920938463463374607431768211456 ").unwrap();

		assert_eq!(numbers.len(), 4);
		assert_eq!(numbers[0], BigUint::from(21u32));
		assert_eq!(numbers[2], BigUint::from(7u32));
		assert_eq!(numbers[3], BigUint::from(1u32) << 128u32);
	}

	#[test]
	fn empty_lines_have_no_numbers() {
		assert_eq!(parse_numbers(""), Ok(Vec::new()));
		assert_eq!(parse_numbers("   "), Ok(Vec::new()));
	}

	#[test]
	fn rejects_signs_and_words() {
		assert_eq!(
			parse_numbers("1 -2 3"),
			Err(InputError::NotAnInteger {
				position: 2,
				token: "-2".into(),
			})
		);
		assert_eq!(
			parse_numbers("4 five"),
			Err(InputError::NotAnInteger {
				position: 2,
				token: "five".into(),
			})
		);
		assert!(parse_numbers("+").is_err());
		assert!(parse_numbers("1.5").is_err());
	}
}
