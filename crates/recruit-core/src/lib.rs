//! Core types and trait definitions for the RecruitPro dashboard client.
//!
//! This crate is deliberately free of HTTP and terminal dependencies. It holds
//! the canonical entity schemas (and the normalisation from the server's
//! drifting record shapes), the error taxonomy, client-side validation rules,
//! and the [`api::RecruitApi`] / [`session::SessionProvider`] seams that the
//! HTTP client implements and the views depend on.

// Native `async fn` in traits; the futures are `Send` where it matters.
#![allow(async_fn_in_trait)]

pub mod api;
pub mod candidate;
mod de;
pub mod error;
pub mod job;
pub mod session;
pub mod top_match;
pub mod upload;
pub mod weights;

pub use error::{Error, Result, ValidationError};
