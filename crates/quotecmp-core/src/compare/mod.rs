pub mod engine;
pub mod outcome;

pub use engine::compare;
