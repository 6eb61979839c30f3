//! Input processing module
//! Handles file detection and raw text extraction from resume documents

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use manager::InputManager;
