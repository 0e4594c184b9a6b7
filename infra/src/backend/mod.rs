//! Backend REST API integration

mod client;

pub use client::HttpBackendClient;
