pub mod transcript;
pub mod ui;
