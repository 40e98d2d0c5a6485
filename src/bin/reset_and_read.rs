use anyhow::Result;
use serial_tap::core::poll::{self, ErrorPolicy, PollSettings};
use serial_tap::core::reset::ResetPulse;
use serial_tap::core::session::SerialSession;
use std::io;
use std::time::Duration;

const PORT: &str = "COM4";
const BAUD_RATE: u32 = 115_200;
const READ_TIMEOUT: Duration = Duration::from_secs(1);

fn main() -> Result<()> {
    env_logger::init();

    let mut session = SerialSession::open(PORT, BAUD_RATE, READ_TIMEOUT)?;

    // Pulse DTR to reboot the attached board, then give it time to boot.
    ResetPulse::default().run(&mut session)?;

    println!("=== Reading Serial Output ===");

    let settings = PollSettings {
        iterations: 100,
        idle_delay: Duration::from_millis(50),
    };
    let mut stdout = io::stdout().lock();
    poll::run(
        settings,
        ErrorPolicy::WarnAndContinue,
        &mut session,
        &mut stdout,
    )?;

    session.close();
    Ok(())
}
