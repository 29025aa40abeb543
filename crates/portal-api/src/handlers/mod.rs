//! HTTP handlers

pub mod health;
pub mod menu_items;
pub mod notifications;
pub mod permissions;
pub mod roles;
