use std::io::Read;

use flytouch::{Connection, FnSink, device};

/// Decode a captured byte stream from stdin and print one line per touch.
fn main() {
    println!("{} ({})", device::DEVICE.name, device::DESCRIPTION);

    let mut conn = Connection::connect(FnSink(|e: flytouch::TouchEvent| {
        println!("x={:#06x} y={:#06x} {}", e.x, e.y, if e.pressed { "down" } else { "up" });
    }));

    for byte in std::io::stdin().lock().bytes() {
        match byte {
            Ok(b) => conn.receive(b),
            Err(e) => {
                eprintln!("read error: {e}");
                break;
            }
        }
    }

    let stats = conn.stats();
    drop(conn.disconnect());
    eprintln!(
        "{} bytes, {} events, {} bad markers, {} discarded frames",
        stats.bytes, stats.events, stats.unknown_markers, stats.discarded_frames
    );
}
