pub mod repository;
pub mod service;

mod model;
pub use model::Address;
