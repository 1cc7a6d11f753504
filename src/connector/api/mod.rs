pub mod container;
pub mod controller;
pub mod router;

pub use container::*;
pub use router::*;
