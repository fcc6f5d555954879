pub mod env_var;
pub mod input;
