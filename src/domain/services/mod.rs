pub mod defaults;
pub mod validation;
