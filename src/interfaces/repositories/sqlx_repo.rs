use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxAlumniRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxProgramRepo {
    pub pool: PgPool,
}
