pub mod response;
pub mod validate_request;

pub use response::{ApiResponse, ApiResult};
pub use validate_request::{collect_errors, validate_request};
