mod form_controller;
mod generate_controller;

pub use form_controller::*;
pub use generate_controller::*;
