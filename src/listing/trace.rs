use std::{
	io::{Result, Write},
	thread,
	time::Duration,
};

use num_bigint::BigUint;

use crate::{code::data::Variable, machine::engine::Observer};

static POINTER: &str = "i";

/// Prints the header, a rule under it, then one `pointer values...` line per snapshot.
pub struct TraceWriter<'a> {
	writer: &'a mut dyn Write,
}

impl<'a> TraceWriter<'a> {
	pub fn new(writer: &'a mut dyn Write) -> Self {
		Self { writer }
	}
}

impl Observer for TraceWriter<'_> {
	fn header(&mut self, names: &[Variable]) -> Result<()> {
		let header = std::iter::once(POINTER.to_string())
			.chain(names.iter().map(ToString::to_string))
			.collect::<Vec<_>>()
			.join(" ");

		writeln!(self.writer, "{header}")?;
		writeln!(self.writer, "{}", "-".repeat(header.len()))
	}

	fn snapshot(&mut self, pointer: usize, values: &[BigUint]) -> Result<()> {
		write!(self.writer, "{pointer}")?;

		for value in values {
			write!(self.writer, " {value}")?;
		}

		writeln!(self.writer)?;
		self.writer.flush()
	}
}

/// Waits a fixed delay after every snapshot but the first.
pub struct Paced<O> {
	inner: O,
	delay: Duration,
	started: bool,
}

impl<O> Paced<O> {
	pub const fn new(inner: O, delay: Duration) -> Self {
		Self {
			inner,
			delay,
			started: false,
		}
	}
}

impl<O: Observer> Observer for Paced<O> {
	fn header(&mut self, names: &[Variable]) -> Result<()> {
		self.inner.header(names)
	}

	fn snapshot(&mut self, pointer: usize, values: &[BigUint]) -> Result<()> {
		if self.started && !self.delay.is_zero() {
			thread::sleep(self.delay);
		}

		self.started = true;
		self.inner.snapshot(pointer, values)
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use num_bigint::BigUint;

	use super::{Paced, TraceWriter};
	use crate::machine::{analyzer::Analyzer, engine::Runner};

	fn numbers(values: &[u32]) -> Vec<BigUint> {
		values.iter().copied().map(BigUint::from).collect()
	}

	#[test]
	fn prints_the_sample_trace() {
		let program = Analyzer::default()
			.build(&numbers(&[45, 34, 350, 2, 46]), &numbers(&[1]))
			.unwrap();
		let mut buffer = Vec::new();

		Runner::new()
			.run(&program, &mut TraceWriter::new(&mut buffer))
			.unwrap();

		let expected = "\
i X1 X2 X3 Z1 Z2 Y
------------------
1 1 0 0 0 0 0
2 0 0 0 0 0 0
3 0 0 0 0 1 0
4 0 0 0 0 1 0
5 0 0 0 0 1 1
";

		assert_eq!(String::from_utf8(buffer).unwrap(), expected);
	}

	#[test]
	fn pacing_keeps_the_output() {
		let program = Analyzer::default().build(&numbers(&[2]), &[]).unwrap();
		let mut buffer = Vec::new();
		let mut observer = Paced::new(TraceWriter::new(&mut buffer), Duration::from_millis(1));

		Runner::new().run(&program, &mut observer).unwrap();

		assert_eq!(String::from_utf8(buffer).unwrap(), "i Y\n---\n1 0\n1 1\n");
	}
}
