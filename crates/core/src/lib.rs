pub mod cache;
pub mod practice;
pub mod storage;
