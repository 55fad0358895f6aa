//! QMUI Core
//!
//! Plain value types shared by the QMUI crates:
//!
//! - **Color**: RGBA color with hex parsing and per-channel interpolation
//! - **Geometry**: `Point` and `Size`
//!
//! # Example
//!
//! ```rust
//! use qmui_core::Color;
//!
//! let brand = Color::parse_hex("#31BD65").unwrap();
//! assert_eq!(brand, Color::from_hex(0x31BD65));
//! assert_eq!(brand.to_hex(), "#31bd65");
//! ```

pub mod color;
pub mod geometry;

pub use color::{Color, ColorParseError};
pub use geometry::{Point, Size};
