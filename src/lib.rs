pub mod dataset;
pub mod matching;
pub mod models;
pub mod utils;
