#[cfg(target_os = "espidf")]
mod config;
#[cfg(target_os = "espidf")]
mod platform;

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use esp_idf_svc::log::EspLogger;
    use log::*;

    esp_idf_sys::link_patches();
    EspLogger::initialize_default();
    info!("Starting STMPE811 touch poller");

    platform::run(&config::Config::new())
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("stmpe811-esp32-rs polls real hardware and only runs on ESP-IDF targets");
}
