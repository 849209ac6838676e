pub mod analyzer;
pub mod cleaner;
pub mod config;
pub mod fetcher;
pub mod model;
pub mod pipeline;
pub mod reporter;
pub mod utils;
pub mod visualizer;
