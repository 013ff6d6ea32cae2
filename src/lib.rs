pub mod command;
pub mod config;
pub mod gateway;
pub mod i18n;
pub mod router;
pub mod security;
pub mod server;
pub mod session;
pub mod stats;
pub mod telegram;
pub mod translation;
