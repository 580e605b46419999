pub mod database;
pub mod error;
pub mod memory;
pub mod metrics;
pub mod seed;
pub mod store;

pub use database::MongoDb;
pub use error::StoreError;
pub use memory::InMemorySongStore;
pub use metrics::{get_metrics, init_metrics};
pub use seed::{load_songs, parse_songs, reseed};
pub use store::SongStore;
