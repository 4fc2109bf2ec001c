pub mod diagnosis;
pub mod enums;
pub mod training;

pub use diagnosis::*;
pub use enums::*;
pub use training::*;
