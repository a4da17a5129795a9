pub mod booking;
pub mod errors;

pub use booking::{Booking, BookingInput, BookingStatus, BOOKING_KEY_PREFIX};
pub use errors::ModelError;
