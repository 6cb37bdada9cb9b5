//! Reasoning-service clients for Pegwise.
//!
//! All advisors implement the `pegwise_core::Advisor` trait. The only
//! production backend is the OpenAI `/v1/responses` endpoint.

pub mod openai;

pub use openai::OpenAiAdvisor;
