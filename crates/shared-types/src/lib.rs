pub mod error;
pub mod feature_flags;

// Mero Samaj domain modules
pub mod auth;
pub mod contact;
pub mod donation;
pub mod guard;
pub mod identity;
pub mod issue;
pub mod ngo;
pub mod upload;
pub mod volunteer;

pub use error::*;
pub use feature_flags::*;

pub use auth::*;
pub use contact::*;
pub use donation::*;
pub use issue::*;
pub use ngo::*;
pub use upload::*;
pub use volunteer::*;
