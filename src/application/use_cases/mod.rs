mod generate_listing;

pub use generate_listing::*;
