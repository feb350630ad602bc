pub mod app;
pub mod delivery;
pub mod http;
pub mod providers;
pub mod ws;
