#![no_main]

use davis::code::{
	data::Instruction,
	pairing::{compose, decompose},
};
use libfuzzer_sys::fuzz_target;
use num_bigint::BigUint;

fuzz_target!(|digits: Vec<u32>| {
	let code = BigUint::new(digits);
	let triple = decompose(&code);

	assert_eq!(compose(&triple), code);
	assert_eq!(Instruction::from(triple).encode(), code);
});
