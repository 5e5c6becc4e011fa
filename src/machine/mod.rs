pub mod analyzer;
pub mod data;
pub mod engine;
pub mod registers;
