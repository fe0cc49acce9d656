pub mod analysis;
pub mod niche;

pub use analysis::*;
pub use niche::*;
