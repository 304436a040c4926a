pub mod dispatch;
pub mod ranking;
