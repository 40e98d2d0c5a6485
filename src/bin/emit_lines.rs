use std::io::Write;
use std::thread;
use std::time::Duration;

const PORT: &str = "COM9";
const BAUD_RATE: u32 = 115_200;

fn main() {
    println!("Opening {} at {}...", PORT, BAUD_RATE);

    let mut port = serialport::new(PORT, BAUD_RATE)
        .timeout(Duration::from_millis(10))
        .open()
        .expect("Failed to open port");

    println!("Port opened. Emitting lines (Ctrl+C to stop)...");

    let mut counter = 0u32;
    loop {
        counter += 1;
        // Every fourth message is blank, every other one padded, so a
        // reader on the far end has its trimming exercised.
        let message = match counter % 4 {
            0 => "\r\n".to_string(),
            1 => format!("  boot[{}] status ok  \r\n", counter),
            _ => format!("boot[{}] heartbeat\r\n", counter),
        };

        match port.write_all(message.as_bytes()) {
            Ok(_) => {
                print!("Sent: {}", message);
                let _ = port.flush();
            }
            Err(e) => {
                eprintln!("Failed to write: {}", e);
            }
        }

        thread::sleep(Duration::from_millis(50));
    }
}
