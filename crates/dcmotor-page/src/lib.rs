#![no_std]

//! Motor control page
//!
//! A single HTML document with a speed slider. Every slider movement issues
//! `GET /set?valor=<speed>` with the speed in `-100..=100`.

/// The control page, served verbatim as `text/html`.
pub const CONTROL_PAGE_HTML: &[u8] = include_bytes!("../index.html");
