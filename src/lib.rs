pub mod badge;
pub mod error;
pub mod logger;
pub mod report;
