//! Tunnel digger: a grid arcade game where the player digs through dirt,
//! wakes enemies by entering their home tunnels and harpoons them.
//!
//! The library holds the whole simulation; the binary only samples the
//! keyboard, calls [`compute::tick`] once per frame and draws the result.

pub mod compute;
pub mod config;
pub mod entities;
pub mod geometry;
pub mod score_store;
pub mod tunnels;
