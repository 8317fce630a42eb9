pub mod api_client;
pub mod catalog;
pub mod configuration;
pub mod render;
pub mod startup;
pub mod view_model;

pub use api_client::{CatalogApi, RequestClient, RequestError};
pub use catalog::*;
pub use configuration::*;
pub use view_model::{ViewModel, ViewState};
