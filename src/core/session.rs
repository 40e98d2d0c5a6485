use anyhow::{Result, anyhow};
use log::info;
use serialport::SerialPort;
use std::io::{self, Read};
use std::thread;
use std::time::Duration;

use crate::core::poll::LineSource;
use crate::core::reset::ControlLine;

/// Exclusive handle on one serial device, from open to close.
pub struct SerialSession {
    port: Box<dyn SerialPort>,
    name: String,
}

impl SerialSession {
    /// Open the device with a bounded per-read timeout so no read can
    /// block indefinitely. Fails if the device is missing or busy.
    pub fn open(port_name: &str, baud_rate: u32, read_timeout: Duration) -> Result<Self> {
        let port = serialport::new(port_name, baud_rate)
            .timeout(read_timeout)
            .open()
            .map_err(|e| anyhow!("Failed to open port {}: {}", port_name, e))?;

        info!("Opened serial port: {} at {}", port_name, baud_rate);
        Ok(Self {
            port,
            name: port_name.to_string(),
        })
    }

    /// Give the device time to settle before the first read.
    pub fn wait_ready(&self, delay: Duration) {
        thread::sleep(delay);
    }

    pub fn close(self) {
        drop(self.port);
        info!("Closed serial port: {}", self.name);
    }
}

impl LineSource for SerialSession {
    fn data_ready(&mut self) -> io::Result<bool> {
        self.port
            .bytes_to_read()
            .map(|n| n > 0)
            .map_err(io::Error::from)
    }

    /// Read up to and including the next newline. A timeout mid-line
    /// yields whatever arrived so far rather than an error.
    fn read_line(&mut self) -> io::Result<Vec<u8>> {
        let mut raw = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            match self.port.read(&mut byte) {
                Ok(0) => break,
                Ok(_) => {
                    raw.push(byte[0]);
                    if byte[0] == b'\n' {
                        break;
                    }
                }
                Err(ref e) if e.kind() == io::ErrorKind::TimedOut => break,
                Err(e) => return Err(e),
            }
        }
        Ok(raw)
    }
}

impl ControlLine for SerialSession {
    fn set_dtr(&mut self, level: bool) -> Result<()> {
        self.port
            .write_data_terminal_ready(level)
            .map_err(|e| anyhow!("Failed to set DTR on {}: {}", self.name, e))
    }
}
