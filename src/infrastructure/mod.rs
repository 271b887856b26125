pub mod core;
pub mod factory;
pub mod market_data;
pub mod news;

pub use factory::ServiceFactory;
