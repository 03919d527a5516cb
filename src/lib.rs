pub mod ast;
pub mod message;
pub mod semant;

pub use semant::analyze;
