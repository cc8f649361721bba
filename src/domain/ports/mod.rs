pub mod notification_sink;
pub mod price_source;
