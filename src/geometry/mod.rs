mod fan_out;
mod resolver;
mod types;

pub use fan_out::*;
pub use resolver::*;
pub use types::*;

#[cfg(test)]
mod geometry_tests;
