pub mod instruction;
pub mod trace;
