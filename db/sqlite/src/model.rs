pub mod client;
pub mod contact;
pub mod newsletter;
pub mod project;
