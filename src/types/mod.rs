/// Domain types shared by the service, storage and HTTP layers
pub mod student;
pub mod time;

pub use student::Student;
pub use time::{BirthDate, Timestamp};
