pub mod binding;
pub mod compiler;
pub mod error;
pub mod resolve;
pub mod throttle;
