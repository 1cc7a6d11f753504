mod generated;
mod listing;
mod prompt;

pub use generated::*;
pub use listing::*;
pub use prompt::*;
