pub mod media;
pub mod platform;
pub mod storage;
