pub mod dog_api;
pub mod event;
pub mod slack;
