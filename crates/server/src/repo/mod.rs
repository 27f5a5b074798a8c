pub mod account;
pub mod contact;
pub mod donation;
pub mod issue;
pub mod membership;
pub mod ngo;
pub mod refresh_token;
pub mod stats;
pub mod user;
pub mod volunteer;
