use anyhow::Result;
use log::info;
use std::thread;
use std::time::Duration;

/// Output-only control signal assumed wired to the target's reset input.
pub trait ControlLine {
    /// Drive the DTR level; low asserts reset on the assumed wiring.
    fn set_dtr(&mut self, level: bool) -> Result<()>;
}

/// Two-step DTR transition that forces an attached device through a
/// power-on cycle. Best-effort: timing only, no readback of whether the
/// device actually rebooted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetPulse {
    /// How long DTR stays low before release.
    pub hold: Duration,
    /// How long to wait for the device to boot after release.
    pub boot_wait: Duration,
}

impl Default for ResetPulse {
    fn default() -> Self {
        Self {
            hold: Duration::from_millis(500),
            boot_wait: Duration::from_secs(2),
        }
    }
}

impl ResetPulse {
    /// Assert low, hold, release high, wait for boot.
    pub fn run(&self, line: &mut dyn ControlLine) -> Result<()> {
        line.set_dtr(false)?;
        thread::sleep(self.hold);
        line.set_dtr(true)?;
        thread::sleep(self.boot_wait);
        info!(
            "Reset pulse done ({}ms hold, {}ms boot wait)",
            self.hold.as_millis(),
            self.boot_wait.as_millis()
        );
        Ok(())
    }
}
