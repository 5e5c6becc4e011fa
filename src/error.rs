use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
	Label,
	Opcode,
	Operand,
}

impl std::fmt::Display for Component {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Self::Label => "label",
			Self::Opcode => "opcode",
			Self::Operand => "operand",
		};

		f.write_str(name)
	}
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
	#[error("{component} index must not be negative, got {value}")]
	Negative { component: Component, value: String },

	#[error("{component} index {value} does not fit in 64 bits")]
	TooLarge { component: Component, value: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
	#[error("expected a non-negative integer at position {position}, found `{token}`")]
	NotAnInteger { position: usize, token: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
	#[error("line {line}: unexpected `{token}`")]
	Unexpected { line: usize, token: String },

	#[error("line {line}: instruction ends early")]
	Truncated { line: usize },

	#[error("line {line}: `{name}` is not a label")]
	BadLabel { line: usize, name: String },

	#[error("line {line}: `{name}` is not a variable")]
	BadVariable { line: usize, name: String },

	#[error("line {line}: `{left}` and `{right}` must name the same variable")]
	Mismatch {
		line: usize,
		left: String,
		right: String,
	},
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
	#[error("label {label} is attached to both line {first} and line {second}")]
	DuplicateLabel {
		label: String,
		first: usize,
		second: usize,
	},

	#[error("variable {variable} needs more than {limit} registers")]
	TooManyRegisters { variable: String, limit: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExecError {
	#[error("line {line} jumps to {label}, which no line carries")]
	UndefinedJumpTarget { label: String, line: usize },
}

#[derive(Debug, Error)]
pub enum RunError {
	#[error(transparent)]
	Exec(#[from] ExecError),

	#[error("failed to write snapshot: {0}")]
	Io(#[from] std::io::Error),
}
