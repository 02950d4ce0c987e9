pub mod audit;
pub mod config;
pub mod dedupe;
pub mod extract;
pub mod filename;
pub mod index;
pub mod model;
pub mod paths;
pub mod pipeline;
pub mod present;
pub mod raw;
pub mod render;
pub mod warn;
