pub mod domain;
pub mod errors;
pub mod lookup;
pub mod ports;
pub mod services;

pub use errors::CoreError;
pub use lookup::Lookup;
