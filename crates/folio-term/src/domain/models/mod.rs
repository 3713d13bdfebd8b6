mod action;
mod event;
mod message;
mod quick_prompt;
mod role;
mod upload;

pub use action::*;
pub use event::*;
pub use message::*;
pub use quick_prompt::*;
pub use role::*;
pub use upload::*;

pub use folio_client::{BackendBox, ClientError, PortfolioBackend};
