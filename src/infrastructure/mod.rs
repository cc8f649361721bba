pub mod feeds;
pub mod sinks;
