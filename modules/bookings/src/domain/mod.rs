pub mod error;
pub mod policy;
pub mod ports;
pub mod repo;
pub mod service;
pub mod time;
