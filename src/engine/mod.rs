pub mod http;

pub use http::{ApiClient, HttpError};
