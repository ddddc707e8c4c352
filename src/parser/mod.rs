pub mod accumulator;
pub mod sentence;
pub mod splitter;

pub use accumulator::*;
pub use sentence::*;
pub use splitter::*;
