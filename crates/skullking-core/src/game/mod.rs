pub mod engine;
pub mod serialization;
pub mod sheet;
pub mod state;
