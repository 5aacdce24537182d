pub mod greet;
pub mod hello;
