pub mod appointment;
pub mod barber;
