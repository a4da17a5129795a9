//! File-backed store implementations.

pub mod bookings;

pub use bookings::BookingService;
