mod state;
mod model;

pub use state::*;
pub use model::ViewModel;
