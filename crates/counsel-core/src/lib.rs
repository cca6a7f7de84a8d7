pub mod agent;
pub mod config;
pub mod error;
pub mod report;
pub mod risk;
pub mod routing;
pub mod scenario;
pub mod session;
pub mod template;

// Re-export common error type
pub use error::CounselError;
