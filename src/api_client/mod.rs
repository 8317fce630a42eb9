mod catalog_api;
mod request_client;
mod request_error;

pub use catalog_api::*;
pub use request_client::RequestClient;
pub use request_error::RequestError;
