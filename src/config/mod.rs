//! Configuration module for Forsk.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{ArxivSettings, ChatSettings, GeneralSettings, LatexSettings, Settings};
