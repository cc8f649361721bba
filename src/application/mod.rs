pub mod dispatch;
pub mod evaluate;
pub mod monitor;
pub mod scheduler;
