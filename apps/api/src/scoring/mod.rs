pub mod encoding;
pub mod engine;
pub mod handlers;
pub mod matching;
pub mod regression;
pub mod stats;
pub mod weights;
