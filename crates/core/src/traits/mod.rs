pub mod clock;
pub mod random;
pub mod repository;

pub use clock::*;
pub use random::*;
pub use repository::*;
