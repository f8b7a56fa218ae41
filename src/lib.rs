pub mod app;
pub mod engine;
pub mod input;
pub mod reading;
pub mod ui;
