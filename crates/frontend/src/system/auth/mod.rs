pub mod api;
pub mod bootstrap;
pub mod context;
pub mod session;
mod storage;
