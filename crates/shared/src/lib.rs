pub mod dataset;
pub mod error;
pub mod grid;
pub mod models;
pub mod projection;
pub mod scoring;
pub mod session;
pub mod viewport;

pub use error::DatasetError;
