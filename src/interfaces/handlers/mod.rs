pub mod alumni;
pub mod alumni_form;
pub mod charts;
pub mod home;
pub mod programs;
pub mod system;
pub mod update_form;
