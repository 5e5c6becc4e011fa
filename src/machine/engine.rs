use std::{
	io,
	sync::{
		atomic::{AtomicBool, Ordering},
		Arc,
	},
};

use log::{info, trace, warn};
use num_bigint::BigUint;

use crate::{
	code::data::{Label, Operation, Variable},
	error::{ExecError, RunError},
};

use super::{
	data::{Program, Snapshot},
	registers::Registers,
};

/// What a taken jump to a label no line carries does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitPolicy {
	/// Stop the machine, the usual reading of `GOTO E` for an unused `E`.
	#[default]
	Halt,
	/// Report `ExecError::UndefinedJumpTarget`.
	Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
	/// The last line ran without jumping back.
	End,
	/// A jump was taken to a label no line carries.
	Exit(Label),
	/// The step budget ran out.
	StepLimit(u64),
	/// The cancel flag was raised.
	Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
	Moved,
	Halted { snapshot: bool, reason: Halt },
}

pub struct Engine<'a> {
	program: &'a Program,
	registers: Registers,
	pointer: usize,
	steps: u64,
	halted: Option<Halt>,
	exit_policy: ExitPolicy,
}

impl<'a> Engine<'a> {
	#[must_use]
	pub fn new(program: &'a Program) -> Self {
		Self {
			program,
			registers: program.registers().clone(),
			pointer: 1,
			steps: 0,
			halted: None,
			exit_policy: ExitPolicy::default(),
		}
	}

	#[must_use]
	pub fn with_exit_policy(mut self, exit_policy: ExitPolicy) -> Self {
		self.exit_policy = exit_policy;
		self
	}

	#[must_use]
	pub const fn pointer(&self) -> usize {
		self.pointer
	}

	#[must_use]
	pub const fn registers(&self) -> &Registers {
		&self.registers
	}

	#[must_use]
	pub const fn steps(&self) -> u64 {
		self.steps
	}

	#[must_use]
	pub const fn halted(&self) -> Option<Halt> {
		self.halted
	}

	#[must_use]
	pub fn snapshot(&self) -> Snapshot {
		Snapshot {
			pointer: self.pointer,
			values: self.registers.values().to_vec(),
		}
	}

	fn halt(&mut self, reason: Halt, snapshot: bool) -> Step {
		self.halted = Some(reason);

		Step::Halted { snapshot, reason }
	}

	// Halting on the last line leaves the pointer there.
	fn advance(&mut self, last: bool) -> Step {
		if last {
			self.halt(Halt::End, true)
		} else {
			self.pointer += 1;

			Step::Moved
		}
	}

	fn jump(&mut self, target: Label, slot: usize, last: bool) -> Result<Step, ExecError> {
		if self.registers.is_zero(slot) {
			// Falling off the end repeats the previous state, so no snapshot.
			return Ok(if last {
				self.halt(Halt::End, false)
			} else {
				self.pointer += 1;

				Step::Moved
			});
		}

		match (self.program.target(target), self.exit_policy) {
			(Some(line), _) => {
				self.pointer = line;

				Ok(Step::Moved)
			}
			(None, ExitPolicy::Halt) => Ok(self.halt(Halt::Exit(target), false)),
			(None, ExitPolicy::Fail) => Err(ExecError::UndefinedJumpTarget {
				label: target.to_string(),
				line: self.pointer,
			}),
		}
	}

	/// Runs the line under the pointer.
	///
	/// # Errors
	///
	/// Returns `ExecError::UndefinedJumpTarget` if a jump is taken to a label no
	/// line carries while the exit policy is `ExitPolicy::Fail`.
	pub fn step(&mut self) -> Result<Step, ExecError> {
		if let Some(reason) = self.halted {
			return Ok(Step::Halted {
				snapshot: false,
				reason,
			});
		}

		let program = self.program;
		let lines = program.lines();
		let Some(line) = lines.get(self.pointer - 1) else {
			return Ok(self.halt(Halt::End, false));
		};

		let last = self.pointer == lines.len();

		self.steps += 1;

		trace!("{:>4}: {}", self.pointer, line.instruction);

		match line.instruction.operation {
			Operation::Assign => {}
			Operation::Increment => self.registers.increment(line.slot),
			Operation::Decrement => self.registers.decrement(line.slot),
			Operation::JumpIfNonZero(target) => return self.jump(target, line.slot, last),
		}

		Ok(self.advance(last))
	}
}

/// Receives the register names once, then every snapshot in order.
pub trait Observer {
	/// # Errors
	///
	/// Returns an error if the observer cannot record the header.
	fn header(&mut self, _names: &[Variable]) -> io::Result<()> {
		Ok(())
	}

	/// # Errors
	///
	/// Returns an error if the observer cannot record the snapshot.
	fn snapshot(&mut self, pointer: usize, values: &[BigUint]) -> io::Result<()>;
}

/// Keeps every snapshot in memory.
#[derive(Debug, Default)]
pub struct Recorder {
	pub names: Vec<Variable>,
	pub snapshots: Vec<Snapshot>,
}

impl Observer for Recorder {
	fn header(&mut self, names: &[Variable]) -> io::Result<()> {
		self.names = names.to_vec();

		Ok(())
	}

	fn snapshot(&mut self, pointer: usize, values: &[BigUint]) -> io::Result<()> {
		self.snapshots.push(Snapshot {
			pointer,
			values: values.to_vec(),
		});

		Ok(())
	}
}

/// A shared flag that stops a running machine before its next step.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	pub fn cancel(&self) {
		self.0.store(true, Ordering::Relaxed);
	}

	#[must_use]
	pub fn is_cancelled(&self) -> bool {
		self.0.load(Ordering::Relaxed)
	}
}

/// Drives an [`Engine`] to a halt, feeding an [`Observer`].
#[derive(Debug, Clone, Default)]
pub struct Runner {
	max_steps: Option<u64>,
	exit_policy: ExitPolicy,
	cancel: Option<CancelFlag>,
}

impl Runner {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with_max_steps(mut self, max_steps: Option<u64>) -> Self {
		self.max_steps = max_steps;
		self
	}

	#[must_use]
	pub fn with_exit_policy(mut self, exit_policy: ExitPolicy) -> Self {
		self.exit_policy = exit_policy;
		self
	}

	#[must_use]
	pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
		self.cancel = Some(cancel);
		self
	}

	fn interrupted(&self, engine: &Engine) -> Option<Halt> {
		if self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled) {
			return Some(Halt::Cancelled);
		}

		self.max_steps
			.filter(|&max| engine.steps() >= max)
			.map(Halt::StepLimit)
	}

	/// Emits the header and the initial snapshot, then steps until the machine
	/// halts, emitting every snapshot a step produces.
	///
	/// # Errors
	///
	/// Returns `RunError::Exec` if a step fails and `RunError::Io` if the
	/// observer does.
	pub fn run(&self, program: &Program, observer: &mut dyn Observer) -> Result<Halt, RunError> {
		let mut engine = Engine::new(program).with_exit_policy(self.exit_policy);

		observer.header(engine.registers().names())?;
		observer.snapshot(engine.pointer(), engine.registers().values())?;

		loop {
			if let Some(reason) = self.interrupted(&engine) {
				warn!("stopped after {} step(s): {reason:?}", engine.steps());

				return Ok(reason);
			}

			match engine.step()? {
				Step::Moved => {
					observer.snapshot(engine.pointer(), engine.registers().values())?;
				}
				Step::Halted { snapshot, reason } => {
					if snapshot {
						observer.snapshot(engine.pointer(), engine.registers().values())?;
					}

					info!("halted after {} step(s): {reason:?}", engine.steps());

					return Ok(reason);
				}
			}
		}
	}
}
