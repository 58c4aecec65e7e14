//! Service Network: onboarding packet generation and email dispatch.
//!
//! The generator modules are pure; `api` and `notification` hold the only
//! side effects (HTTP serving and the Resend client).

pub mod api;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod generator;
pub mod models;
pub mod notification;
pub mod output;
