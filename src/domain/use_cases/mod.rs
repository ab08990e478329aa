pub mod alumni;
pub mod program;
pub mod reports;
