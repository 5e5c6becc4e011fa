use std::{
	fs::File,
	io::{BufWriter, Write},
	time::Duration,
};

use anyhow::{Context, Result};
use argh::FromArgs;
use davis::{
	code::{data::Triple, parser::parse_listing},
	input::parse_numbers,
	listing::{
		instruction,
		trace::{Paced, TraceWriter},
	},
	machine::{
		analyzer::{Analyzer, DEFAULT_MAX_REGISTERS},
		engine::{ExitPolicy, Halt, Runner},
	},
};
use log::info;
use num_bigint::BigInt;

/// Encodes, decodes and runs programs of Davis's register-machine language,
/// where every line is a single natural number.
#[derive(FromArgs)]
struct Arguments {
	/// the input file to read
	/// if not specified, stdin is used
	#[argh(option, short = 'i')]
	input: Option<String>,

	/// the output file to write to
	/// if not specified, stdout is used
	#[argh(option, short = 'o')]
	output: Option<String>,

	#[argh(subcommand)]
	command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
	Decode(Decode),
	Run(Run),
	Encode(Encode),
	Pair(Pair),
}

/// print each code of the first input line as an instruction
#[derive(FromArgs)]
#[argh(subcommand, name = "decode")]
struct Decode {}

/// run the program on the first input line with the inputs on the second
#[derive(FromArgs)]
#[argh(subcommand, name = "run")]
struct Run {
	/// stop after this many steps
	#[argh(option)]
	max_steps: Option<u64>,

	/// refuse programs needing more registers than this
	#[argh(option, default = "DEFAULT_MAX_REGISTERS")]
	max_registers: usize,

	/// milliseconds to wait between snapshots
	#[argh(option, default = "0")]
	delay_ms: u64,

	/// fail instead of halting when a jump targets a missing label
	#[argh(switch)]
	strict: bool,
}

/// print the code of each instruction line
#[derive(FromArgs)]
#[argh(subcommand, name = "encode")]
struct Encode {}

/// print the code of the triple <label, <opcode, operand>>
#[derive(FromArgs)]
#[argh(subcommand, name = "pair")]
struct Pair {
	/// label index, 0 for none
	#[argh(positional)]
	label: BigInt,

	/// opcode: 0 assign, 1 increment, 2 decrement, n > 2 jump to label n - 2
	#[argh(positional)]
	opcode: BigInt,

	/// operand index, one below the variable index
	#[argh(positional)]
	operand: BigInt,
}

fn load_input(name: Option<&str>) -> Result<String> {
	if let Some(name) = name {
		std::fs::read_to_string(name).with_context(|| format!("failed to read `{name}`"))
	} else {
		let stdin = std::io::stdin().lock();

		std::io::read_to_string(stdin).context("failed to read stdin")
	}
}

fn load_output(name: Option<&str>) -> Result<Box<dyn Write>> {
	if let Some(name) = name {
		let file = File::create(name).with_context(|| format!("failed to open `{name}`"))?;

		Ok(Box::new(BufWriter::new(file)))
	} else {
		Ok(Box::new(std::io::stdout().lock()))
	}
}

fn nth_line(input: &str, index: usize) -> &str {
	input.lines().nth(index).unwrap_or_default()
}

fn run_decode(input: &str, output: &mut dyn Write) -> Result<()> {
	let codes = parse_numbers(nth_line(input, 0)).context("bad program line")?;

	instruction::write(output, &codes)?;

	Ok(())
}

fn run_program(arguments: &Run, input: &str, output: &mut dyn Write) -> Result<()> {
	let codes = parse_numbers(nth_line(input, 0)).context("bad program line")?;
	let inputs = parse_numbers(nth_line(input, 1)).context("bad input line")?;
	let program = Analyzer::new(arguments.max_registers).build(&codes, &inputs)?;

	let exit_policy = if arguments.strict {
		ExitPolicy::Fail
	} else {
		ExitPolicy::Halt
	};

	let runner = Runner::new()
		.with_max_steps(arguments.max_steps)
		.with_exit_policy(exit_policy);

	let delay = Duration::from_millis(arguments.delay_ms);
	let mut observer = Paced::new(TraceWriter::new(output), delay);

	match runner.run(&program, &mut observer)? {
		Halt::StepLimit(steps) => anyhow::bail!("no halt within {steps} step(s)"),
		reason => info!("finished: {reason:?}"),
	}

	Ok(())
}

fn run_encode(input: &str, output: &mut dyn Write) -> Result<()> {
	for instruction in parse_listing(input)? {
		writeln!(output, "{}", instruction.encode())?;
	}

	Ok(())
}

fn run_pair(arguments: &Pair, output: &mut dyn Write) -> Result<()> {
	let triple = Triple::from_signed(&arguments.label, &arguments.opcode, &arguments.operand)?;

	writeln!(output, "{}", triple.encode())?;

	Ok(())
}

fn main() -> Result<()> {
	env_logger::init();

	let arguments = argh::from_env::<Arguments>();
	let output = &mut load_output(arguments.output.as_deref())?;

	let input = || load_input(arguments.input.as_deref());

	match &arguments.command {
		Command::Decode(_) => run_decode(&input()?, output)?,
		Command::Run(run) => run_program(run, &input()?, output)?,
		Command::Encode(_) => run_encode(&input()?, output)?,
		Command::Pair(pair) => run_pair(pair, output)?,
	}

	output.flush().context("failed to write output")
}
