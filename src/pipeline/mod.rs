pub mod decode;
pub mod diagnosis;

pub use decode::*;
pub use diagnosis::*;
