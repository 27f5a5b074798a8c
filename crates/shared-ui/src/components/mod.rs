// Layout
pub mod card;
pub mod detail_list;
pub mod page_header;

// Inputs
pub mod button;
pub mod form;
pub mod form_select;
pub mod input;
pub mod textarea;

// Feedback
pub mod alert;
pub mod badge;
pub mod progress;
pub mod skeleton;

// Re-exports for convenience
pub use alert::*;
pub use badge::*;
pub use button::*;
pub use card::*;
pub use detail_list::*;
pub use form::*;
pub use form_select::*;
pub use input::*;
pub use page_header::*;
pub use progress::*;
pub use skeleton::*;
pub use textarea::*;
