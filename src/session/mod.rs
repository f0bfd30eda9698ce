mod error;
mod view;

pub use error::SessionError;
pub use view::SessionView;
pub use view::ViewState;
