//! microblog - a small self-hostable microblogging backend
//!
//! Users post tweets with optional media attachments, like tweets and follow
//! each other. Every request is authenticated by an API key.
//!
//! - [`store`]: SQLite persistence
//! - [`service`]: transactional operations and their rules
//! - [`http_server`]: the JSON API
//! - [`cli`]: `serve` and `seed` commands

pub mod cli;
pub mod http_server;
pub mod service;
pub mod store;
