pub mod error;
pub mod language;
pub mod method;
pub mod settings;

#[cfg(test)]
mod serde_tests;
