//! Payloads handed to the presentation layer.

pub mod catalog;
