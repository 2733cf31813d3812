// Data models and request/response types

pub mod exercise;
pub mod muscle;
pub mod reaction;
pub mod routine;
pub mod validation;

pub use exercise::*;
pub use muscle::*;
pub use reaction::*;
pub use routine::*;
pub use validation::*;
