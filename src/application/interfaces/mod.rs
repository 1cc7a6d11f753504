mod copy_generator;
mod listing_log;
mod secrets_provider;

pub use copy_generator::*;
pub use listing_log::*;
pub use secrets_provider::*;
