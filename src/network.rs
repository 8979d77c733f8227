//! Raw packet socket handling for one named network device.
//!
//! The handle owns the socket for the whole run. Hardware address and
//! MTU are looked up once at open time through the SIOCGIFHWADDR and
//! SIOCGIFMTU ioctls and cached; nothing is re-resolved afterwards.

use std::io;
use std::mem;
use std::os::unix::io::AsRawFd;

use libc::IFNAMSIZ;
use socket2::Socket;

use crate::error::NetError;
use crate::general::{self, format_mac};
use crate::NetResult;

#[derive(Debug)]
pub struct InterfaceHandle {
    name: String,
    mac: [u8; 6],
    mtu: u16,
    socket: Option<Socket>,
}

impl InterfaceHandle {
    /// Opens a raw AF_PACKET socket bound to the named device and
    /// caches its hardware address and MTU. Needs CAP_NET_RAW.
    ///
    /// Over-length device names are rejected outright rather than
    /// truncated to the ifreq buffer, since a truncated name would
    /// silently query a different device.
    pub fn open(name: &str) -> NetResult<Self> {
        if name.len() >= IFNAMSIZ {
            return Err(NetError(format!(
                "interface name '{name}' is longer than the {} byte limit",
                IFNAMSIZ - 1
            )));
        }

        let interface = general::get_interface(name)?;

        let proto = (libc::ETH_P_ALL as u16).to_be() as i32;
        let socket = Socket::new(
            libc::AF_PACKET.into(),
            libc::SOCK_RAW.into(),
            Some(proto.into()),
        )
        .map_err(|err| {
            NetError(format!(
                "unable to open raw socket on {name} (are you running as root?): {err}"
            ))
        })?;

        bind_to_device(&socket, interface.index as i32)?;

        let mac = query_hardware_address(&socket, name)?;
        let mtu = query_mtu(&socket, name)?;

        log::info!(
            "({name}) bound raw socket, hwaddr {}, mtu {mtu}",
            format_mac(&mac)
        );

        Ok(InterfaceHandle {
            name: name.to_string(),
            mac,
            mtu,
            socket: Some(socket),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hardware_address(&self) -> [u8; 6] {
        self.mac
    }

    /// The cached hardware address in lower-case colon-hex form.
    pub fn hardware_address_string(&self) -> String {
        format_mac(&self.mac)
    }

    pub fn mtu(&self) -> u16 {
        self.mtu
    }

    /// Transmits the given bytes as a single link-layer frame on the
    /// bound device. No retries; a failed send is fatal to the run.
    pub fn send(&self, frame: &[u8]) -> NetResult<()> {
        let socket = self.socket.as_ref().ok_or_else(|| {
            NetError(format!("raw socket on {} is already closed", self.name))
        })?;
        socket
            .send(frame)
            .map_err(|err| NetError(format!("send on {} failed: {err}", self.name)))?;
        Ok(())
    }

    /// Releases the socket descriptor. Calling this twice is a no-op;
    /// dropping the handle covers the case where it was never called.
    pub fn close(&mut self) {
        if let Some(socket) = self.socket.take() {
            drop(socket);
            log::debug!("({}) raw socket closed", self.name);
        }
    }
}

fn bind_to_device(socket: &Socket, ifindex: i32) -> NetResult<()> {
    let mut addr: libc::sockaddr_ll = unsafe { mem::zeroed() };
    addr.sll_family = libc::AF_PACKET as u16;
    addr.sll_protocol = (libc::ETH_P_ALL as u16).to_be();
    addr.sll_ifindex = ifindex;

    let rc = unsafe {
        libc::bind(
            socket.as_raw_fd(),
            &addr as *const libc::sockaddr_ll as *const libc::sockaddr,
            mem::size_of::<libc::sockaddr_ll>() as libc::socklen_t,
        )
    };
    if rc < 0 {
        return Err(NetError(format!(
            "unable to bind raw socket to device index {ifindex}: {}",
            io::Error::last_os_error()
        )));
    }
    Ok(())
}

// The name has already been length-checked, so the trailing NUL of the
// fixed ifr_name buffer is always preserved.
fn ifreq_for(name: &str) -> libc::ifreq {
    let mut req: libc::ifreq = unsafe { mem::zeroed() };
    for (dst, src) in req.ifr_name.iter_mut().zip(name.as_bytes()) {
        *dst = *src as libc::c_char;
    }
    req
}

fn query_hardware_address(socket: &Socket, name: &str) -> NetResult<[u8; 6]> {
    let mut req = ifreq_for(name);
    let rc = unsafe { libc::ioctl(socket.as_raw_fd(), libc::SIOCGIFHWADDR, &mut req) };
    if rc < 0 {
        return Err(NetError(format!(
            "SIOCGIFHWADDR on {name} failed: {}",
            io::Error::last_os_error()
        )));
    }

    let sa_data = unsafe { req.ifr_ifru.ifru_hwaddr.sa_data };
    let mut mac = [0u8; 6];
    for (octet, raw) in mac.iter_mut().zip(&sa_data[..6]) {
        *octet = *raw as u8;
    }
    Ok(mac)
}

fn query_mtu(socket: &Socket, name: &str) -> NetResult<u16> {
    let mut req = ifreq_for(name);
    let rc = unsafe { libc::ioctl(socket.as_raw_fd(), libc::SIOCGIFMTU, &mut req) };
    if rc < 0 {
        return Err(NetError(format!(
            "SIOCGIFMTU on {name} failed: {}",
            io::Error::last_os_error()
        )));
    }
    Ok(unsafe { req.ifr_ifru.ifru_mtu } as u16)
}
