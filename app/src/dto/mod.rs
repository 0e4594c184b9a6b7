//! Display DTOs handed to the host UI

pub mod video;

pub use video::VideoDisplayItem;
