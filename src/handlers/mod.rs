pub mod admin;
pub mod slack_events;
