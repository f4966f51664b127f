//! Free listen-port allocation
//!
//! Finds a block of consecutive loopback TCP ports for the generated
//! inbounds. Probing binds a transient listener per candidate port and
//! releases it immediately, so the answer is point-in-time only: a port may
//! be taken again between the probe and the consuming engine binding it.

use std::net::{Ipv4Addr, TcpListener};

use tracing::{debug, trace};

use crate::error::{Error, Result};

/// Returns `true` if a transient listener can bind `port` on loopback.
fn port_is_free(port: u16) -> bool {
    TcpListener::bind((Ipv4Addr::LOCALHOST, port)).is_ok()
}

/// Finds the starting port of `count` consecutive ports that all probed
/// free, scanning upward from `start`.
///
/// A single failed probe discards the whole run accumulated so far, not
/// just the failing port. `count == 0` returns `start` without probing.
/// The scan is bounded by the end of the port space.
pub fn find_free_block(start: u16, count: usize) -> Result<u16> {
    find_free_block_with(start, count, port_is_free)
}

/// Scan core, generic over the probe so the run semantics are testable
/// without real sockets.
fn find_free_block_with(
    start: u16,
    count: usize,
    mut probe: impl FnMut(u16) -> bool,
) -> Result<u16> {
    if count == 0 {
        return Ok(start);
    }

    let mut run = 0usize;
    let mut run_start = start;
    let mut port = start;
    loop {
        if probe(port) {
            if run == 0 {
                run_start = port;
            }
            run += 1;
            if run == count {
                debug!(
                    "Found {} consecutive free ports starting at {}",
                    count, run_start
                );
                return Ok(run_start);
            }
        } else {
            if run > 0 {
                trace!("Port {} busy, discarding run of {}", port, run);
            }
            run = 0;
        }
        port = match port.checked_add(1) {
            Some(next) => next,
            None => return Err(Error::PortAllocationExhausted { start, count }),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_count_returns_start_without_probing() {
        let mut probes = 0;
        let start = find_free_block_with(41000, 0, |_| {
            probes += 1;
            true
        })
        .unwrap();
        assert_eq!(start, 41000);
        assert_eq!(probes, 0);
    }

    #[test]
    fn all_free_returns_start() {
        let start = find_free_block_with(40000, 5, |_| true).unwrap();
        assert_eq!(start, 40000);
    }

    #[test]
    fn busy_probe_discards_the_whole_run() {
        // 40000 and 40001 free, 40002 busy, everything above free: a block
        // of 3 must restart after the busy port, not resume the earlier run.
        let start = find_free_block_with(40000, 3, |p| p != 40002).unwrap();
        assert_eq!(start, 40003);
    }

    #[test]
    fn scan_walks_past_multiple_busy_ports() {
        let busy = [40001, 40005];
        let start = find_free_block_with(40000, 3, |p| !busy.contains(&p)).unwrap();
        assert_eq!(start, 40002);
    }

    #[test]
    fn exhausted_scan_is_an_error() {
        let err = find_free_block_with(65530, 10, |_| false).unwrap_err();
        assert!(matches!(err, Error::PortAllocationExhausted { .. }));
    }

    #[test]
    fn block_longer_than_remaining_port_space_is_exhausted() {
        let err = find_free_block_with(65530, 10, |_| true).unwrap_err();
        assert!(matches!(err, Error::PortAllocationExhausted { .. }));
    }

    #[test]
    fn probed_block_is_bindable() {
        let start = find_free_block(40000, 3).unwrap();
        assert!(start >= 40000);
        for offset in 0..3 {
            assert!(port_is_free(start + offset));
        }
    }

    #[test]
    fn held_socket_resets_a_real_scan() {
        // Find a quiet stretch, occupy its second port, and re-scan: the
        // result must land past the held port.
        let base = find_free_block(42000, 4).unwrap();
        let _guard = TcpListener::bind((Ipv4Addr::LOCALHOST, base + 1)).unwrap();
        let start = find_free_block(base, 4).unwrap();
        assert!(start > base + 1);
    }
}
