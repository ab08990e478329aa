pub mod alumni;
pub mod program;
pub mod sqlx_repo;
