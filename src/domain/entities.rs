pub mod contact_form;
pub mod message;
