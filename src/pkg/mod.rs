pub mod internal;
pub mod server;
