#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::cast_possible_truncation, // board coordinates and levels are tiny
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
)]
pub mod arena;
pub mod sim;
pub mod strategies;
