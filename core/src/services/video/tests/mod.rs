//! Tests for the video generation service

#[cfg(test)]
mod mocks;
#[cfg(test)]
mod service_tests;
