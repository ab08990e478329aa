mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{db, links};

use errors::AppError;
use links::signed_link::SignedLinkService;
use repositories::sqlx_repo::{SqlxAlumniRepo, SqlxProgramRepo};
use use_cases::{alumni::AlumniHandler, program::ProgramHandler, reports::ReportsHandler};

pub type AppAlumniHandler = AlumniHandler<SqlxAlumniRepo, SqlxProgramRepo>;
pub type AppProgramHandler = ProgramHandler<SqlxProgramRepo>;
pub type AppReportsHandler = ReportsHandler<SqlxAlumniRepo>;

pub struct AppState {
    pub alumni_handler: AppAlumniHandler,
    pub program_handler: AppProgramHandler,
    pub reports_handler: AppReportsHandler,
    pub links: SignedLinkService,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Result<Self, AppError> {
        let alumni_repo = SqlxAlumniRepo::new(pool.clone());
        let program_repo = SqlxProgramRepo::new(pool);

        Ok(AppState {
            alumni_handler: AlumniHandler::new(alumni_repo.clone(), program_repo.clone()),
            program_handler: ProgramHandler::new(program_repo),
            reports_handler: ReportsHandler::new(alumni_repo),
            links: SignedLinkService::new(config)?,
        })
    }
}
