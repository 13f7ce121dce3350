use crate::error::{DecodeError, Layer};
use std::net::Ipv4Addr;

pub const IPV4_MIN_HEADER_LENGTH: usize = 20;
pub const IP_PROTOCOL_TCP: u8 = 6;

const VERSION_SHIFT: u8 = 4;
const IHL_MASK: u8 = 0x0f;
const IHL_UNIT_BYTES: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IPv4Header {
    pub version: u8,
    // バイト単位 (IHL * 4)
    pub header_length: u8,
    pub dscp: u8,
    pub ecn: u8,
    pub total_length: u16,
    pub identification: u16,
    pub flags: u8,
    pub fragment_offset: u16,
    pub ttl: u8,
    pub protocol: u8,
    pub checksum: u16,
    pub source: Ipv4Addr,
    pub destination: Ipv4Addr,
}

impl IPv4Header {
    pub fn parse(data: &[u8]) -> Result<(Self, &[u8]), DecodeError> {
        if data.len() < IPV4_MIN_HEADER_LENGTH {
            return Err(DecodeError::TruncatedHeader {
                layer: Layer::Ipv4,
                needed: IPV4_MIN_HEADER_LENGTH,
                available: data.len(),
            });
        }

        let version = data[0] >> VERSION_SHIFT;
        let header_length = (data[0] & IHL_MASK) * IHL_UNIT_BYTES;

        // 宣言されたヘッダー長が固定部より短い場合も切り詰めとして扱う
        let declared = usize::from(header_length);
        if declared < IPV4_MIN_HEADER_LENGTH {
            return Err(DecodeError::TruncatedHeader {
                layer: Layer::Ipv4,
                needed: IPV4_MIN_HEADER_LENGTH,
                available: declared,
            });
        }
        if data.len() < declared {
            return Err(DecodeError::TruncatedHeader {
                layer: Layer::Ipv4,
                needed: declared,
                available: data.len(),
            });
        }

        let dscp = data[1] >> 2;
        let ecn = data[1] & 0x3;
        let total_length = u16::from_be_bytes([data[2], data[3]]);
        let identification = u16::from_be_bytes([data[4], data[5]]);
        let flags = (data[6] >> 5) & 0x7;
        let fragment_offset = u16::from_be_bytes([data[6] & 0x1f, data[7]]);
        let ttl = data[8];
        let protocol = data[9];
        let checksum = u16::from_be_bytes([data[10], data[11]]);
        // アドレスはヘッダー長に関わらず固定オフセット
        let source = Ipv4Addr::new(data[12], data[13], data[14], data[15]);
        let destination = Ipv4Addr::new(data[16], data[17], data[18], data[19]);

        // オプション領域はデコードせず、ペイロードの切り出しで読み飛ばす
        Ok((
            Self {
                version,
                header_length,
                dscp,
                ecn,
                total_length,
                identification,
                flags,
                fragment_offset,
                ttl,
                protocol,
                checksum,
                source,
                destination,
            },
            &data[declared..],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_header() -> Vec<u8> {
        vec![
            0x45, 0x00, // バージョン/IHL, DSCP/ECN
            0x00, 0x1c, // 全長 (28)
            0xab, 0xcd, // 識別子
            0x40, 0x00, // フラグ/フラグメントオフセット (DF)
            0x40, 0x06, // TTL (64), プロトコル (TCP)
            0x00, 0x00, // チェックサム
            192, 168, 1, 10, // 送信元アドレス
            10, 0, 0, 1, // 宛先アドレス
        ]
    }

    #[test]
    fn test_parse_minimal_header() {
        let mut data = minimal_header();
        data.extend_from_slice(&[1, 2, 3, 4]);

        let (header, payload) = IPv4Header::parse(&data).expect("パースに失敗しました");

        assert_eq!(header.version, 4);
        assert_eq!(header.header_length, 20);
        assert_eq!(header.total_length, 28);
        assert_eq!(header.identification, 0xabcd);
        assert_eq!(header.flags, 0x2);
        assert_eq!(header.fragment_offset, 0);
        assert_eq!(header.ttl, 64);
        assert_eq!(header.protocol, IP_PROTOCOL_TCP);
        assert_eq!(header.source, Ipv4Addr::new(192, 168, 1, 10));
        assert_eq!(header.destination, Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(payload, &[1, 2, 3, 4]);
    }

    #[test]
    fn test_options_are_skipped() {
        // IHL = 6 (24バイト)、オプション4バイト付き
        let mut data = minimal_header();
        data[0] = 0x46;
        data.extend_from_slice(&[0x01, 0x01, 0x01, 0x01]);
        data.extend_from_slice(&[0xca, 0xfe]);

        let (header, payload) = IPv4Header::parse(&data).expect("パースに失敗しました");

        assert_eq!(header.header_length, 24);
        assert_eq!(payload, &[0xca, 0xfe]);
    }

    #[test]
    fn test_permissive_version_field() {
        // 構造は固定レイアウトとみなし、バージョン不一致でもパースは続行する
        let mut data = minimal_header();
        data[0] = 0x65;

        let (header, _) = IPv4Header::parse(&data).expect("パースに失敗しました");
        assert_eq!(header.version, 6);
        assert_eq!(header.header_length, 20);
    }

    #[test]
    fn test_truncated_buffer() {
        let data = vec![0x45; 19];

        let result = IPv4Header::parse(&data);
        assert_eq!(
            result,
            Err(DecodeError::TruncatedHeader {
                layer: Layer::Ipv4,
                needed: 20,
                available: 19,
            })
        );
    }

    #[test]
    fn test_declared_length_exceeds_buffer() {
        // IHL = 6 (24バイト) だがバッファは20バイトしかない
        let mut data = minimal_header();
        data[0] = 0x46;

        let result = IPv4Header::parse(&data);
        assert_eq!(
            result,
            Err(DecodeError::TruncatedHeader {
                layer: Layer::Ipv4,
                needed: 24,
                available: 20,
            })
        );
    }

    #[test]
    fn test_declared_length_below_minimum() {
        // IHL = 4 (16バイト) は固定部に満たない
        let mut data = minimal_header();
        data[0] = 0x44;

        let result = IPv4Header::parse(&data);
        assert_eq!(
            result,
            Err(DecodeError::TruncatedHeader {
                layer: Layer::Ipv4,
                needed: 20,
                available: 16,
            })
        );
    }
}
