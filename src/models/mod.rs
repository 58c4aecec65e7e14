pub mod event;
pub mod packet;
pub mod service;
pub mod workflow;
