#![forbid(unsafe_code)]

pub mod json;
pub mod repository;
pub mod sqlite;

pub use json::JsonRosterRepository;
pub use repository::{
    ELIGIBILITY_KEY, InMemoryRepository, KeyValueRepository, RosterRepository, Storage,
    StorageError,
};
