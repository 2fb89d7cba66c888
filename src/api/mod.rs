pub mod client;
pub mod payloads;
