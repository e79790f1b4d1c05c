// Application layer - Monitor loop, dispatch and the ports it drives
pub mod dispatcher;
pub mod monitor;
pub mod notifier;
pub mod reading_source;
pub mod surfaces;
pub mod weather_provider;
pub mod weather_service;
