pub mod display;
pub mod hd44780;
