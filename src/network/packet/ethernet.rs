use crate::error::{DecodeError, Layer};

pub const ETHERNET_HEADER_LENGTH: usize = 14;
pub const ETHERTYPE_IPV4: u16 = 0x0800;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthernetHeader {
    pub destination: [u8; 6],
    pub source: [u8; 6],
    pub ethertype: u16,
}

impl EthernetHeader {
    pub fn parse(data: &[u8]) -> Result<(Self, &[u8]), DecodeError> {
        if data.len() < ETHERNET_HEADER_LENGTH {
            return Err(DecodeError::TruncatedHeader {
                layer: Layer::Ethernet,
                needed: ETHERNET_HEADER_LENGTH,
                available: data.len(),
            });
        }

        let mut destination = [0u8; 6];
        let mut source = [0u8; 6];

        destination.copy_from_slice(&data[0..6]);
        source.copy_from_slice(&data[6..12]);

        // ワイヤ上はビッグエンディアン、ホストオーダーへの変換は一度だけ行う
        let ethertype = u16::from_be_bytes([data[12], data[13]]);

        Ok((
            Self {
                destination,
                source,
                ethertype,
            },
            &data[ETHERNET_HEADER_LENGTH..],
        ))
    }
}
