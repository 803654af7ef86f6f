//! redeem-matrix: column-major dense matrices with strided and index-list views.
//!
//! A [`Mat`] stores doubles column by column. Parts of it are addressed through
//! a [`Selection`] (rows, columns, blocks, spans or explicit index lists) and
//! operated on in place with an [`Op`] tag, either directly on the buffer when
//! the selection is contiguous or through a [`View`]/[`ViewMut`] otherwise.
//!
//! Supporting pieces: text load/save in [`io`], seeded random fill in [`rng`],
//! serde-backed settings in [`config`], and `ndarray` conversions.
pub mod config;
pub mod error;
pub mod io;
pub mod math;
pub mod rng;

pub use config::{MatConfig, TextFormat};
pub use error::{MatError, Result};
pub use math::{Mat, Op, Operand, Selection, Size, Span, View, ViewMut};
pub use rng::MatRng;
