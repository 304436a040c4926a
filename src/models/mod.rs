pub mod notification;
pub mod profile;
pub mod request;
pub mod vendor;
