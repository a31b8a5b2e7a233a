pub mod db;
pub mod models;
mod recordings;
mod tables;

pub use db::{Database, DatabaseError};
pub use tables::*;
