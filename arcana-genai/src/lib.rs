//! Client for the generative media service behind the oracle's visions:
//! image creation and editing, tarot readings with card art, and soulmate
//! portraits.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod rituals;
mod wire;

pub use client::*;
pub use config::*;
pub use error::*;
pub use model::*;
pub use rituals::*;
