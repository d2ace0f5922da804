pub mod network;
pub mod url;

// Re-export common utilities
pub use network::{is_ip_address, LOCALHOST};
pub use url::{url_decode, url_encode};
