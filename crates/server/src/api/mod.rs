#[cfg(feature = "server")]
pub(crate) mod auth;

mod session;
pub use session::*;

mod issue;
pub use issue::*;

mod donation;
pub use donation::*;

mod community;
pub use community::*;
