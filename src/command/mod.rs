pub mod config;
pub mod history;
pub mod prepare;
pub mod session_end;
pub mod session_start;
pub mod status;
