pub mod app;
pub mod theme;
pub mod ui;
pub mod viewer_main;
