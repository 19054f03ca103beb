mod deck;
mod image;
mod soulmate;
mod tarot;

pub use deck::*;
pub use image::*;
pub use soulmate::*;
pub use tarot::*;
