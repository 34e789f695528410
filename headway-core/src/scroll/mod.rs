//! Scroll compositing
//!
//! Each of the sign's two lines is composed once per refresh cycle into a
//! list of positioned elements with an analytically known pixel width
//! ([`layout`]), then scrolled one pixel per tick with an independent wrap
//! phase ([`line`]). The renderer receives the composed [`scene`] and does
//! nothing but draw it; it never measures text, which is why every glyph
//! advance here is a fixed pitch.

pub mod layout;
pub mod line;
pub mod scene;

pub use layout::{BADGE_ADVANCE, DEGREE_ADVANCE, GLYPH_PITCH};
pub use line::ScrollLine;
pub use scene::{Element, Layer, LineContent, Scene};
