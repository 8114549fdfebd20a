pub mod domain;
pub mod ports;
pub mod schema;
pub mod services;
