//! Display classification: lookup tables turned into enums with explicit
//! defaults, plus the small formatting helpers the views share.

pub mod documents;
pub mod timeline;

/// Colour family for badges; templates turn it into a `tone-*` class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Purple,
    Blue,
    Green,
    Red,
    Yellow,
    Orange,
    Indigo,
    Pink,
    Sky,
    Gray,
}

impl Tone {
    pub fn css_class(self) -> &'static str {
        match self {
            Tone::Purple => "tone-purple",
            Tone::Blue => "tone-blue",
            Tone::Green => "tone-green",
            Tone::Red => "tone-red",
            Tone::Yellow => "tone-yellow",
            Tone::Orange => "tone-orange",
            Tone::Indigo => "tone-indigo",
            Tone::Pink => "tone-pink",
            Tone::Sky => "tone-sky",
            Tone::Gray => "tone-gray",
        }
    }
}
