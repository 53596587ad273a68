//! Precedent repositories

mod catalog;
mod in_memory;
mod postgres;

pub use catalog::seed_precedents;
pub use in_memory::InMemoryPrecedentRepository;
pub use postgres::PostgresPrecedentRepository;
