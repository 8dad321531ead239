pub mod codes;
pub mod handlers;

pub use codes::ErrorCode;
