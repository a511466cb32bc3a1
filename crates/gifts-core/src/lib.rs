pub mod answers;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod identity;
pub mod io;
pub mod paths;
pub mod plan;
pub mod result;
pub mod sanitize;
pub mod score;
pub mod session;
pub mod store;

pub use error::{GiftsError, Result};
