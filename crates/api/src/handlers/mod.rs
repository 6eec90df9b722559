pub mod chaos;
pub mod health;
pub mod infrastructure;
pub mod observability;
pub mod orders;
pub mod products;
