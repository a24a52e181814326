//! # touchstick
//!
//! On-screen analog joystick for touch and pointer driven interfaces, with an
//! egui host binding and a small console to try it out.
//!
//! - [`joystick`] - the framework independent core
//! - [`host`] - the interface a GUI framework implements to carry joysticks
//! - [`ui`] - egui implementation of that interface and the console app
//! - [`config`] - TOML layout of the console
//! - [`report_sink`] - async consumer for joystick reports

pub mod config;
pub mod host;
pub mod joystick;
pub mod report_sink;
pub mod ui;
