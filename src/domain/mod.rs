mod package;
mod types;

pub use package::{AddRequest, CodPrice, Package};
pub use types::{ApiResponse, Endpoint, Timings};
