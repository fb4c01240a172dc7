// src/matching/mod.rs
pub mod capacity;
pub mod geospatial;
pub mod manager;
pub mod postcode;
pub mod report;
pub mod scoring;
pub mod selector;
pub mod text;
