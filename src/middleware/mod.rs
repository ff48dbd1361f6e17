mod error_handler;
mod request_log;

pub use error_handler::{handle_panic, log_errors};
pub use request_log::log_requests;
