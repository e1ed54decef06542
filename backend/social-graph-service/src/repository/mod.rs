mod graph_repository;
mod postgres;

pub use graph_repository::GraphRepository;
pub use postgres::PostgresGraphRepository;
