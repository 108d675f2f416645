//! Apirelay is a two-process HTTP pass-through demo.
//!
//! The **origin service** exposes a small REST API returning static or
//! echoed JSON. The **forwarding proxy** mirrors those endpoints,
//! relaying each inbound request one-to-one to the origin over plain
//! HTTP and wrapping the origin's response in a JSON envelope before
//! returning it to the caller.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (origin, proxy, health).
//! - [`client`] -- Generic JSON request helper over a pooled hyper client.
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`headers`] -- Outbound header construction and hop-by-hop stripping.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`origin`] -- Origin service routes and handlers.
//! - [`proxy`] -- Forwarding proxy routes, handlers, and shared state.
//! - [`server`] -- Axum serving, shared 404 fallback, and graceful shutdown.

// Binary crate — public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod client;
pub mod cmd;
pub mod error;
pub mod headers;
pub mod logging;
pub mod origin;
pub mod proxy;
pub mod server;
