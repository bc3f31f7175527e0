//! Request handlers

pub mod events;
pub mod forms;
pub mod health;
pub mod insights;
pub mod panels;
