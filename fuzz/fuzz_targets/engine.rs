#![no_main]

use davis::machine::{
	analyzer::Analyzer,
	engine::{Recorder, Runner},
};
use davis_fuzz::program::Program;
use libfuzzer_sys::{fuzz_target, Corpus};

fuzz_target!(|program: Program| -> Corpus {
	let Ok(program) = Analyzer::default().build(&program.codes, &program.inputs) else { return Corpus::Reject };

	let mut recorder = Recorder::default();
	let _ = Runner::new().with_max_steps(Some(4096)).run(&program, &mut recorder);

	Corpus::Keep
});
