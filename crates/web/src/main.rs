use std::sync::Arc;

use geocoding::client::{GeocodingClient, GeocodingCredentials};
use web::{start_web_server, WebConfig, WebState};

#[tokio::main]
async fn main() {
    env_logger::init();

    // geocoding
    let credentials = GeocodingCredentials::env()
        .expect("expected geocoding credentials in env.");
    let geocoder =
        GeocodingClient::new(&credentials).expect("could not create geocoding client.");

    // web server
    let web_future = start_web_server(WebState::new(Arc::new(geocoder)), WebConfig::from_env());

    if let Err(why) = web_future.await {
        log::error!("web server stopped: {}", why);
    }
}
