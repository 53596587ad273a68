//! Precedent catalog domain - entities, search and repository

mod entity;
mod repository;
mod search;

pub use entity::Precedent;
pub use repository::PrecedentRepository;
pub use search::{
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PrecedentPage, PrecedentQuery, rank_order, total_pages,
};

#[cfg(test)]
pub use repository::MockPrecedentRepository;
