pub mod position;
pub mod project;
pub mod project_type;
pub mod team;
pub mod worker;
