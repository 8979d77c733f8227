//! This is the main file for the sender process. The frame is built
//! exactly once, before the loop starts, from the source MAC and MTU
//! discovered when the interface handle was opened. Nothing gets
//! re-resolved while the loop runs.

use std::time::Duration;

use crate::{
    config::CliArgs, general::fill_payload, network::InterfaceHandle, packet::EthernetFrame,
    NetResult,
};

pub fn run(args: CliArgs) -> NetResult<()> {
    let mut handle = InterfaceHandle::open(&args.interface)?;

    // use the MTU as payload size if no explicit size was given
    let packet_size = if args.packetsize != 0 {
        args.packetsize
    } else {
        handle.mtu() as usize
    };

    let payload = fill_payload(&args.data, packet_size)?;
    let frame = EthernetFrame {
        dst_mac: args.dst_mac,
        src_mac: handle.hardware_address(),
        ethertype: args.ether_proto,
        payload,
    };
    let wire = frame.encode();

    log::info!(
        "({}) sending {} byte frames, ethertype 0x{:04x}, every {} ms (count: {})",
        handle.name(),
        wire.len(),
        args.ether_proto,
        args.interval,
        args.count
    );

    let interval = Duration::from_millis(args.interval);
    let result = send_loop(args.count, interval, || handle.send(&wire));

    handle.close();
    result?;

    log::info!("({}) done", args.interface);
    Ok(())
}

/// Runs the timed send loop. A negative count sends until the process
/// is stopped, zero sends nothing, anything else sends exactly `count`
/// frames. Sleeps after every send, the last one included, matching
/// the interval a receiver will observe between frames.
pub fn send_loop<S>(count: i64, interval: Duration, mut send: S) -> NetResult<()>
where
    S: FnMut() -> NetResult<()>,
{
    let mut remaining = count;
    while remaining != 0 {
        send()?;
        std::thread::sleep(interval);
        if remaining > 0 {
            remaining -= 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetError;

    #[test]
    fn loop_sends_exact_count() {
        let mut sent = 0;
        send_loop(3, Duration::ZERO, || {
            sent += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(sent, 3);
    }

    #[test]
    fn loop_count_zero_sends_nothing() {
        let mut sent = 0;
        send_loop(0, Duration::ZERO, || {
            sent += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(sent, 0);
    }

    #[test]
    fn loop_negative_count_runs_until_stopped() {
        // bound the unbounded case by failing the send from the harness
        let mut sent = 0;
        let result = send_loop(-1, Duration::ZERO, || {
            sent += 1;
            if sent == 50 {
                Err(NetError("stop".to_string()))
            } else {
                Ok(())
            }
        });
        assert!(result.is_err());
        assert_eq!(sent, 50);
    }

    #[test]
    fn loop_aborts_on_first_send_error() {
        let mut sent = 0;
        let result = send_loop(10, Duration::ZERO, || {
            sent += 1;
            Err(NetError("device down".to_string()))
        });
        assert!(result.is_err());
        assert_eq!(sent, 1);
    }
}
