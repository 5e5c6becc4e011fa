//! Gödel numbering and execution for the register-machine language of
//! Davis's *Computability, Complexity, and Languages*.
//!
//! Every program line is a single natural number `<a, <b, c>>`: `a` its
//! label, `b` its operation and `c` the variable it works on.

pub mod code;
pub mod error;
pub mod input;
pub mod listing;
pub mod machine;
