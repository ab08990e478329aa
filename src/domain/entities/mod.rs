pub mod alumni;
pub mod chart;
pub mod program;
