pub mod manager;
pub mod mapper;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use mapper::WritePath;
pub use memory::MemoryStudentStore;
pub use models::StudentRow;
pub use postgres::PgStudentStore;
pub use store::{StoreError, StudentStore};
