pub mod app;
pub mod chrome;
pub mod controller;
pub mod edit;
pub mod input;
pub mod monitor;
pub mod render;
pub mod rows;
pub mod scheduler;
pub mod theme;

pub use app::run;
