pub mod appointment_test;
pub mod doctor_test;
pub mod middleware_test;
