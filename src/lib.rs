#![deny(clippy::print_stdout)]

pub mod similarity;
pub mod toolkit;
