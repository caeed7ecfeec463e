pub mod catalog;
pub mod config;
pub mod cosine;
pub mod error;
pub mod features;
pub mod recommendation;
pub mod recommender;
pub mod server;
pub mod tfidf;
pub mod types;
