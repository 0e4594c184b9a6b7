//! Video generation planning and history
//!
//! Owns the request-construction rules for the three generation modes,
//! the coin cost gate, and page-by-page history fetching.

mod service;

#[cfg(test)]
mod tests;

pub use service::{
    AttachedImage, GenerationInput, GenerationMode, GenerationPlan, HistoryPage, VideoService,
};
