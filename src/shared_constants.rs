use embassy_time::Duration;

/// The number of cells (digits) in the display.
/// The display is a 4-digit, 8-segment display behind a chain of four shift registers.
pub const CELL_COUNT: usize = 4;

/// The number of status LEDs under the digits.
pub const LED_COUNT: usize = 4;

/// Debounce delay for the buttons.
/// This prevents registering multiple presses from a single button press event.
pub const BUTTON_DEBOUNCE_DELAY: Duration = Duration::from_millis(10);

/// Delay before a held button starts repeating while a field is being set.
pub const BUTTON_REPEAT_DELAY: Duration = Duration::from_millis(250);

/// One full breath of the status LEDs.
/// `sin(t * PI / 2)` completes a cycle every four seconds.
pub const BREATHE_PERIOD: Duration = Duration::from_millis(4000);

/// Length of a single feedback beep.
pub const BEEP_DURATION: Duration = Duration::from_millis(100);

/// Silence between the two halves of a double beep.
pub const BEEP_GAP: Duration = Duration::from_millis(75);
