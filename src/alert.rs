use tracing::info;

/// Plays a short cue when the countdown expires.
///
/// Fire-and-forget: implementations swallow their own errors.
pub trait AlertPlayer: Send + Sync {
    fn play(&self);
}

/// Rings the terminal bell
pub struct TerminalBell;

impl AlertPlayer for TerminalBell {
    fn play(&self) {
        print!("\x07");
        use std::io::Write;
        std::io::stdout().flush().ok();
        info!("Time is up");
    }
}
