pub mod budget;
pub mod config;
pub mod itinerary;
pub mod output;
pub mod server;
pub mod trip;
