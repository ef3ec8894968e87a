pub mod origin;
pub mod rules;
pub mod validate;
