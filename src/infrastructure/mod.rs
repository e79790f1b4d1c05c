// Infrastructure layer - External dependencies and adapters
pub mod api_error;
pub mod config;
pub mod http_response;
pub mod openweather;
pub mod telegram;

#[cfg(test)]
pub mod test_support;
