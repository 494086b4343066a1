use std::env::var_os;
use std::ffi::OsStr;
use std::path::Path;
use i2clcd_driver::LcdResult;
use i2clcd_driver::lcd::hd44780::Font;
use serde::{Serialize, Deserialize};

#[derive(Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct Config {
    /// Linux I2C bus number, as in `/dev/i2c-N`.
    pub i2c_bus: u8,
    /// 7-bit address of the backpack.
    pub address: u8,
    pub columns: u8,
    pub rows: u8,
    /// `"5x8"` or `"5x10"`.
    pub font: String,
    /// Printed once after start-up, may contain line breaks.
    pub greeting: String,
}

impl Config {
    pub fn try_load() -> Option<Self> {
        let config_str = var_os("CONFIG_FILE");
        let config_str: &OsStr = config_str.as_deref().unwrap_or(OsStr::new("config.json"));
        let config_path = Path::new(config_str);
        if config_path.exists() {
            let file = std::fs::File::open(config_path).ok()?;
            let reader = std::io::BufReader::new(file);
            serde_json::from_reader(reader).ok()
        } else {
            None
        }
    }

    pub fn font(&self) -> LcdResult<Font> {
        self.font.parse()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            i2c_bus: 1,
            address: 0x27,
            columns: 16,
            rows: 2,
            font: "5x8".to_string(),
            greeting: "Hello Embedded\nSystems!".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{ "address": 63, "rows": 1 }"#).unwrap();
        assert_eq!(config.address, 0x3F);
        assert_eq!(config.rows, 1);
        assert_eq!(config.columns, 16);
        assert_eq!(config.font(), Ok(Font::Dots5x8));
    }

    #[test]
    fn test_unknown_font_is_rejected() {
        let config = Config {
            font: "8x8".to_string(),
            ..Config::default()
        };
        assert!(config.font().is_err());
    }
}
