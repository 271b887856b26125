pub mod errors;
pub mod ports;
pub mod sentiment;
pub mod types;
pub mod validation;
