pub mod cors;
pub mod request_logging;
pub mod validation;
