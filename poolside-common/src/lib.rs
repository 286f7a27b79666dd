#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

pub mod quote;
pub mod ratio;
pub mod units;
