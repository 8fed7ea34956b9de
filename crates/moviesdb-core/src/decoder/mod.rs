//! JSON decoders for TMDB payloads
//!
//! - `media`: media records and paginated media lists
//! - `date`: strict `YYYY-MM-DD` date fields
//!
//! The media type that drives field selection is always an explicit
//! argument; decoders hold no configuration of their own.

pub mod date;
pub mod media;

pub use date::parse_date;
pub use media::{decode_media, decode_page};
