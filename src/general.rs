use crate::{error::NetError, NetResult};
use pnet::datalink::{self, NetworkInterface};

pub(crate) fn get_interface(name: &str) -> NetResult<NetworkInterface> {
    let interface_names_match = |iface: &NetworkInterface| iface.name == name;
    let interfaces = datalink::linux::interfaces();

    match interfaces.into_iter().find(interface_names_match) {
        Some(interface) => Ok(interface),
        None => Err(NetError(format!(
            "unable to find interface with name {name}"
        ))),
    }
}

/// Cycles the seed string byte by byte until the payload holds exactly
/// `size` bytes. An empty seed has nothing to cycle and is rejected as a
/// configuration error.
pub fn fill_payload(seed: &str, size: usize) -> NetResult<Vec<u8>> {
    if seed.is_empty() {
        return Err(NetError(
            "payload seed string '--data' must not be empty".to_string(),
        ));
    }
    Ok(seed.bytes().cycle().take(size).collect())
}

pub fn format_mac(octets: &[u8; 6]) -> String {
    octets
        .iter()
        .map(|octet| format!("{:02x}", octet))
        .collect::<Vec<String>>()
        .join(":")
}
