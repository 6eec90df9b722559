pub mod chaos;
pub mod order;

pub use chaos::*;
pub use order::*;
