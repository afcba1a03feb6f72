pub mod controller;
pub mod generator;
pub mod ingest;
pub mod logging;
pub mod sink;
pub mod state;
