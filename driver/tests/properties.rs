mod common;

use common::{FakeBus, FakeDelay, Log, Sent, bytes, clear, sent};
use i2clcd_driver::lcd::display::{CharacterDisplay, CursorPosition};
use i2clcd_driver::lcd::hd44780::Font;
use i2clcd_driver::lcd::hd44780::driver::PIN_BACKLIGHT;
use proptest::prelude::*;

proptest! {
    #[test]
    fn cursor_position_is_clamped(column in any::<u8>(), row in any::<u8>(), columns in 1u8..=40, rows in 1u8..=2) {
        let log = Log::default();
        let mut bus = FakeBus::new(&log);
        let mut delay = FakeDelay::new(&log);
        let mut lcd = CharacterDisplay::initialize(&mut bus, &mut delay, 0x27, columns, rows, Font::Dots5x8).unwrap();
        clear(&log);

        lcd.set_cursor_position(column, row).unwrap();

        let expected = CursorPosition::new(column.min(columns - 1), row.min(rows - 1));
        prop_assert_eq!(lcd.cursor(), expected);
        let offset = if expected.row == 0 { 0x00 } else { 0x40 };
        prop_assert_eq!(sent(&log), vec![Sent::Command(0x80 | (offset + expected.column))]);
    }

    #[test]
    fn printing_advances_and_wraps(count in 0usize..100) {
        let log = Log::default();
        let mut bus = FakeBus::new(&log);
        let mut delay = FakeDelay::new(&log);
        let mut lcd = CharacterDisplay::initialize(&mut bus, &mut delay, 0x27, 16, 2, Font::Dots5x8).unwrap();

        lcd.print_str(&"#".repeat(count)).unwrap();

        let expected = match count {
            0 => CursorPosition::new(0, 0),
            n => CursorPosition::new(((n - 1) % 16 + 1) as u8, (((n - 1) / 16) % 2) as u8),
        };
        prop_assert_eq!(lcd.cursor(), expected);

        let data = sent(&log).iter().filter(|s| matches!(s, Sent::Data(_))).count();
        prop_assert_eq!(data, count);
    }

    #[test]
    fn backlight_bit_is_always_current(on in any::<bool>(), text in "[ -~\n]{0,40}") {
        let log = Log::default();
        let mut bus = FakeBus::new(&log);
        let mut delay = FakeDelay::new(&log);
        let mut lcd = CharacterDisplay::initialize(&mut bus, &mut delay, 0x27, 16, 2, Font::Dots5x8).unwrap();
        lcd.set_backlight(on).unwrap();

        lcd.print_str(&text).unwrap();
        lcd.set_cursor_home().unwrap();

        for byte in bytes(&log) {
            prop_assert_eq!(byte & PIN_BACKLIGHT != 0, on);
        }
    }
}
