mod env_secrets;
mod gemini_client;
mod memory_log;
mod mock_generator;
mod openai_client;
mod sheets_log;

pub use env_secrets::*;
pub use gemini_client::*;
pub use memory_log::*;
pub use mock_generator::*;
pub use openai_client::*;
pub use sheets_log::*;
