use anyhow::Result;
use serial_tap::core::poll::{self, ErrorPolicy, PollSettings};
use serial_tap::core::session::SerialSession;
use std::io;
use std::time::Duration;

const PORT: &str = "COM4";
const BAUD_RATE: u32 = 115_200;
const READ_TIMEOUT: Duration = Duration::from_secs(1);
const SETTLE_DELAY: Duration = Duration::from_secs(2);

fn main() -> Result<()> {
    env_logger::init();

    let mut session = SerialSession::open(PORT, BAUD_RATE, READ_TIMEOUT)?;
    session.wait_ready(SETTLE_DELAY);

    let settings = PollSettings {
        iterations: 50,
        idle_delay: Duration::from_millis(100),
    };
    let mut stdout = io::stdout().lock();
    poll::run(settings, ErrorPolicy::Fail, &mut session, &mut stdout)?;

    session.close();
    Ok(())
}
