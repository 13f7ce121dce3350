use crate::display::text::format_mac;
use crate::network::packet::tcp::TCPFlags;
use crate::network::packet::{DecodedFrame, NetworkLayer, TransportLayer};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

// 1フレーム分のデコード結果を所有型へ写したサマリ。JSON出力用
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameRecord {
    pub timestamp: DateTime<Utc>,
    pub interface: String,
    pub length: usize,
    pub destination_mac: String,
    pub source_mac: String,
    pub ethertype: u16,
    pub network: Option<NetworkRecord>,
    pub transport: Option<TransportRecord>,
    pub payload_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkRecord {
    pub version: u8,
    pub header_length: u8,
    pub ttl: u8,
    pub protocol: u8,
    pub source: Ipv4Addr,
    pub destination: Ipv4Addr,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportRecord {
    pub source_port: u16,
    pub destination_port: u16,
    pub sequence_number: u32,
    pub acknowledgment_number: u32,
    pub flags: TCPFlags,
}

impl FrameRecord {
    pub fn from_decoded(decoded: &DecodedFrame, interface: &str, frame_length: usize) -> Self {
        let network = match &decoded.network {
            NetworkLayer::IPv4(ipv4) => Some(NetworkRecord {
                version: ipv4.version,
                header_length: ipv4.header_length,
                ttl: ipv4.ttl,
                protocol: ipv4.protocol,
                source: ipv4.source,
                destination: ipv4.destination,
            }),
            NetworkLayer::Unhandled { .. } | NetworkLayer::Truncated(_) => None,
        };

        let transport = match &decoded.transport {
            Some(TransportLayer::TCP(tcp)) => Some(TransportRecord {
                source_port: tcp.source_port,
                destination_port: tcp.destination_port,
                sequence_number: tcp.sequence_number,
                acknowledgment_number: tcp.acknowledgment_number,
                flags: tcp.flags.clone(),
            }),
            Some(TransportLayer::Unhandled { .. }) | Some(TransportLayer::Truncated(_)) | None => None,
        };

        Self {
            timestamp: Utc::now(),
            interface: interface.to_string(),
            length: frame_length,
            destination_mac: format_mac(&decoded.ethernet.destination),
            source_mac: format_mac(&decoded.ethernet.source),
            ethertype: decoded.ethernet.ethertype,
            network,
            transport,
            payload_length: decoded.payload.len(),
        }
    }
}
