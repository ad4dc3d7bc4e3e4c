pub mod relay;
pub mod template;
