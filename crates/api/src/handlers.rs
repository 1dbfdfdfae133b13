pub mod appointment;
pub mod auth;
pub mod doctor;
pub mod report;
pub mod specialty;
pub mod user;
