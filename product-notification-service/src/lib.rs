//! Product Notification Service - the newest catalog products as notifications.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
