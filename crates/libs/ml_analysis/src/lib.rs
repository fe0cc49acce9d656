#![deny(clippy::unwrap_used)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

mod cost;
mod niches;
mod normalize;
mod prompt;
mod thumbnail_judge;

pub use cost::*;
pub use niches::*;
pub use normalize::*;
pub use prompt::*;
pub use thumbnail_judge::*;
