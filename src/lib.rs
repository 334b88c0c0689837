//! ragapp - RAG application builder
//!
//! A terminal playground for creating RAG applications: pick a collection,
//! model and retriever, then name the application and seed it with example
//! questions.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
