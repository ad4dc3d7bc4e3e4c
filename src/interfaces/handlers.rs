pub mod contact;
pub mod home;
pub mod messages;
pub mod system;
