pub mod auth;
pub mod dashboard;
pub mod decks;
pub mod generate;
pub mod pages;
pub mod progress;
pub mod settings;
pub mod study;
