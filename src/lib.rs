//! Core library for the `buswatch` CLI.
//!
//! Polls live vehicle positions for one transit line, reconciles them onto a
//! map surface as markers, tracks a user-chosen start point and submits
//! arrival alerts. The binary drives all of this from the terminal; the
//! library exposes the pieces so other hosts can supply their own
//! [`map::MapSurface`].
pub mod alert;
pub mod api;
pub mod args;
pub mod config;
pub mod domain;
pub mod error;
pub mod map;
pub mod overlay;
pub mod polling;
pub mod view;

