pub mod cli;
pub mod hash;
