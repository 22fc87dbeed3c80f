pub mod params;

pub use params::{TravelStyle, TripError, TripParameters, TripRequest};
