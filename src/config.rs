use clap::Parser;

use crate::defaults::{
    DEFAULT_COUNT, DEFAULT_DATA, DEFAULT_DST_MAC, DEFAULT_ETHER_PROTO, DEFAULT_INTERFACE,
    DEFAULT_INTERVAL_MS, DEFAULT_PACKET_SIZE,
};

/// Command line surface of the sender. Parsed once at startup and
/// immutable afterwards. Only the destination MAC and the ethertype get
/// validated here; a bad interface name or a nonsensical size surfaces
/// later as an OS error from the socket layer.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "l2sender",
    about = "Build one raw Ethernet frame and send it on an interface, repeatedly."
)]
pub struct CliArgs {
    /// Interface the frames will be sent out on.
    #[arg(short = 'I', long, default_value = DEFAULT_INTERFACE)]
    pub interface: String,

    /// Milliseconds to sleep between consecutive sends.
    #[arg(short = 'i', long, default_value_t = DEFAULT_INTERVAL_MS)]
    pub interval: u64,

    /// Payload size in bytes. 0 means use the interface MTU.
    #[arg(short = 's', long, default_value_t = DEFAULT_PACKET_SIZE)]
    pub packetsize: usize,

    /// Number of frames to send. Negative means send until stopped.
    #[arg(short = 'c', long, default_value_t = DEFAULT_COUNT, allow_negative_numbers = true)]
    pub count: i64,

    /// Destination MAC address, colon or dash separated hex.
    #[arg(short = 'm', long = "dst_mac", default_value = DEFAULT_DST_MAC, value_parser = parse_mac)]
    pub dst_mac: [u8; 6],

    /// EtherType value, decimal or 0x-prefixed hex.
    #[arg(short = 'p', long = "ether_proto", default_value = DEFAULT_ETHER_PROTO, value_parser = parse_ether_proto)]
    pub ether_proto: u16,

    /// Seed string, repeated until the payload size is reached.
    #[arg(short = 'd', long, default_value = DEFAULT_DATA)]
    pub data: String,
}

/// Parses a MAC address of the form aa:bb:cc:dd:ee:ff. The six groups
/// must be separated uniformly, either all colons or all dashes.
pub fn parse_mac(value: &str) -> Result<[u8; 6], String> {
    let sep = match value.chars().nth(2) {
        Some(c @ (':' | '-')) => c,
        _ => return Err(format!("invalid mac format: {value}")),
    };

    let groups: Vec<&str> = value.split(sep).collect();
    if groups.len() != 6 {
        return Err(format!("invalid mac format: {value}"));
    }

    let mut mac = [0u8; 6];
    for (octet, group) in mac.iter_mut().zip(&groups) {
        // from_str_radix tolerates a leading sign, so each group must be
        // checked to hold exactly two hex digits
        if group.len() != 2 || !group.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("invalid mac format: {value}"));
        }
        *octet = u8::from_str_radix(group, 16)
            .map_err(|_| format!("invalid mac format: {value}"))?;
    }
    Ok(mac)
}

/// Parses an ethertype given as decimal or 0x-prefixed hexadecimal.
/// Any value fitting 16 bits is accepted, reserved ones included.
pub fn parse_ether_proto(value: &str) -> Result<u16, String> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => value.parse::<u16>(),
    };
    parsed.map_err(|_| format!("invalid ether proto: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mac_colon_form() {
        assert_eq!(
            parse_mac("aa:bb:cc:dd:ee:ff").unwrap(),
            [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]
        );
    }

    #[test]
    fn mac_dash_form_upper_case() {
        assert_eq!(
            parse_mac("AA-BB-CC-DD-EE-FF").unwrap(),
            [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]
        );
    }

    #[test]
    fn mac_too_few_groups() {
        assert!(parse_mac("aa:bb:cc:dd:ee").is_err());
    }

    #[test]
    fn mac_bad_hex_digit() {
        assert!(parse_mac("gg:bb:cc:dd:ee:ff").is_err());
    }

    #[test]
    fn mac_signed_group_rejected() {
        assert!(parse_mac("aa:bb:cc:dd:ee:+f").is_err());
        assert!(parse_mac("+a:bb:cc:dd:ee:ff").is_err());
        assert!(parse_mac("aa:bb:cc:dd:ee:-1").is_err());
    }

    #[test]
    fn mac_mixed_separators() {
        assert!(parse_mac("aa:bb-cc:dd:ee:ff").is_err());
    }

    #[test]
    fn mac_error_names_the_value() {
        let err = parse_mac("nonsense").unwrap_err();
        assert!(err.contains("nonsense"));
    }

    #[test]
    fn ether_proto_hex() {
        assert_eq!(parse_ether_proto("0x8951").unwrap(), 0x8951);
    }

    #[test]
    fn ether_proto_decimal() {
        assert_eq!(parse_ether_proto("35153").unwrap(), 35153);
    }

    #[test]
    fn ether_proto_rejects_garbage() {
        assert!(parse_ether_proto("notanumber").is_err());
    }

    #[test]
    fn cli_defaults() {
        let args = CliArgs::parse_from(["l2sender"]);
        assert_eq!(args.interface, "eth0");
        assert_eq!(args.interval, 100);
        assert_eq!(args.packetsize, 0);
        assert_eq!(args.count, -1);
        assert_eq!(args.dst_mac, [0x12, 0x23, 0x34, 0x45, 0x56, 0x67]);
        assert_eq!(args.ether_proto, 0x8951);
        assert_eq!(args.data, "hello");
    }

    #[test]
    fn cli_negative_count() {
        let args = CliArgs::parse_from(["l2sender", "-c", "-5"]);
        assert_eq!(args.count, -5);
    }

    #[test]
    fn cli_rejects_bad_mac() {
        assert!(CliArgs::try_parse_from(["l2sender", "-m", "aa:bb:cc:dd:ee"]).is_err());
    }
}
