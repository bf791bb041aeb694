// handlers/mod.rs - HTTP handlers
//
// Each file holds one route. Handlers validate input, call the student
// service and map its result to a status code; they never touch storage.

pub mod health;   // GET /health, GET /ready
pub mod students; // /students, /students/:id

pub use health::{health, ready};
