pub mod manager;
pub mod mapping;
pub mod memory;
pub mod sqlite;

pub use manager::{Repositories, StoreBackend};
pub use memory::InMemoryStore;
pub use sqlite::{
    DatabaseManager, SqliteChaosRepository, SqliteClusterRepository, SqliteStorefrontRepository,
    SqliteTelemetryRepository,
};
