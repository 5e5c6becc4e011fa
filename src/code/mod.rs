pub mod data;
pub mod names;
pub mod pairing;
pub mod parser;
