pub mod client_ip;
pub mod parser;
pub mod pipeline;
pub mod sanitize;
pub mod validate;
