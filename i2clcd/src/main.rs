mod config;

use std::env::var;
use dotenv::dotenv;
use log::{debug, info, warn};
use sysinfo::System;
use i2clcd_driver::delay::{Delay, ThreadDelay};
use i2clcd_driver::i2c::{I2cTransport, RecordingTransport, RppalI2c};
use i2clcd_driver::lcd::display::CharacterDisplay;
use crate::config::Config;

fn main() -> eyre::Result<()> {
    // Initialize environment and logger
    dotenv().ok();
    pretty_env_logger::init();

    const UNKNOWN_STR: &str = "???";

    info!(
        "Hello, {}!",
        System::name().as_deref().unwrap_or(UNKNOWN_STR)
    );
    info!(
        "Hostname {}, architecture {}",
        System::host_name().as_deref().unwrap_or(UNKNOWN_STR),
        System::cpu_arch(),
    );

    let config = if let Some(config) = Config::try_load() {
        info!("Config loaded.");
        config
    } else {
        warn!("No config found, using defaults.");
        Config::default()
    };
    debug!("{:?}", config);

    let font = config.font()?;

    // rppal, or dry-run to only log the bytes
    let backend = var("LCD_BACKEND").unwrap_or_else(|_| "rppal".to_string());
    let mut transport: Box<dyn I2cTransport> = match backend.as_str() {
        "rppal" => Box::new(RppalI2c::new(config.i2c_bus)),
        "dry-run" => Box::new(RecordingTransport::without_history()),
        other => eyre::bail!("Unknown LCD backend: {}", other),
    };
    let mut delay = ThreadDelay;

    info!(
        "LCD @ {:?}, address {:#04x}, {}x{} {:?}",
        transport, config.address, config.columns, config.rows, font
    );

    debug!("Initializing LCD driver...");
    let mut lcd = CharacterDisplay::initialize(
        &mut *transport,
        &mut delay,
        config.address,
        config.columns,
        config.rows,
        font,
    )?;

    lcd.reset_to_known_state()?;
    lcd.set_backlight_on()?;
    lcd.set_cursor_on()?;
    lcd.clear()?;
    lcd.set_cursor_home()?;
    debug!("{:?} initialized.", lcd);

    lcd.print_str(&config.greeting)?;
    ThreadDelay.wait_ms(1000);

    for letter in (b'A'..=b'Z').cycle() {
        lcd.print_char(letter as char)?;
        ThreadDelay.wait_ms(2000);
    }

    Ok(())
}
