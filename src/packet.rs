use bytes::{BufMut, BytesMut};

use crate::defaults::ETH_HDR_LEN;

//
// Ethernet Frame Format.
//
//  0                   1                   2                   3
//  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                    Destination MAC Address                    |
// +                               +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                               |                               |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+                               +
// |                      Source MAC Address                       |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |           EtherType           |            Payload            |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                            .                                  |
// |                            .                                  |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//
// The frame check sequence is left to the driver, so no trailer is
// packed here.
//
#[derive(Clone, Debug)]
pub struct EthernetFrame {
    pub dst_mac: [u8; 6],
    pub src_mac: [u8; 6],
    pub ethertype: u16,
    pub payload: Vec<u8>,
}

impl EthernetFrame {
    // Encodes the frame into a bytes buffer, ready for the wire.
    // Always exactly 14 + payload length bytes. The ethertype is
    // deliberately unchecked; any 16 bit value goes out as given.
    pub fn encode(&self) -> BytesMut {
        let mut buf = BytesMut::with_capacity(ETH_HDR_LEN + self.payload.len());
        buf.put_slice(&self.dst_mac);
        buf.put_slice(&self.src_mac);
        buf.put_u16(self.ethertype);
        buf.put_slice(&self.payload);
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{ByteOrder, NetworkEndian};

    #[test]
    fn encode_layout() {
        let frame = EthernetFrame {
            dst_mac: [0x12, 0x23, 0x34, 0x45, 0x56, 0x67],
            src_mac: [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff],
            ethertype: 0x8951,
            payload: b"hellohel".to_vec(),
        };
        let buf = frame.encode();

        assert_eq!(buf.len(), 14 + 8);
        assert_eq!(&buf[0..6], &[0x12, 0x23, 0x34, 0x45, 0x56, 0x67]);
        assert_eq!(&buf[6..12], &[0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
        assert_eq!(NetworkEndian::read_u16(&buf[12..14]), 0x8951);
        assert_eq!(&buf[14..], b"hellohel");
    }

    #[test]
    fn encode_empty_payload() {
        let frame = EthernetFrame {
            dst_mac: [0xff; 6],
            src_mac: [0x00; 6],
            ethertype: 0x0800,
            payload: vec![],
        };
        assert_eq!(frame.encode().len(), 14);
    }

    #[test]
    fn encode_is_deterministic() {
        let frame = EthernetFrame {
            dst_mac: [1, 2, 3, 4, 5, 6],
            src_mac: [6, 5, 4, 3, 2, 1],
            ethertype: 0xffff,
            payload: vec![0x42; 100],
        };
        assert_eq!(frame.encode(), frame.encode());
    }
}
