pub mod bucket;
pub mod convergence;
pub mod error;
pub mod segment;
pub mod variable;

pub use bucket::*;
pub use convergence::*;
pub use error::*;
pub use segment::*;
pub use variable::*;
