pub mod error;
pub mod logger;
pub mod observable;
pub mod validation;
