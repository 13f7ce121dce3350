pub mod ethernet;
pub mod ipv4;
pub mod tcp;

use crate::error::DecodeError;
use crate::network::packet::ethernet::{EthernetHeader, ETHERTYPE_IPV4};
use crate::network::packet::ipv4::{IPv4Header, IP_PROTOCOL_TCP};
use crate::network::packet::tcp::TCPHeader;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame<'a> {
    pub ethernet: EthernetHeader,
    pub network: NetworkLayer,
    // ネットワーク層がIPv4としてデコードできた場合のみ存在する
    pub transport: Option<TransportLayer>,
    // カスケードが停止した地点以降の未デコードバイト列
    pub payload: &'a [u8],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkLayer {
    IPv4(IPv4Header),
    Unhandled { ethertype: u16 },
    Truncated(DecodeError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportLayer {
    TCP(TCPHeader),
    Unhandled { protocol: u8 },
    Truncated(DecodeError),
}

// イーサネット → IPv4 → TCP のカスケードデコード。
// 下位レイヤの切り詰めはそのレイヤ以下の降下だけを打ち切り、
// デコード済みの上位レイヤは結果に残す。
pub fn decode_frame(data: &[u8]) -> Result<DecodedFrame<'_>, DecodeError> {
    let (ethernet, remainder) = EthernetHeader::parse(data)?;

    // ネットワーク層のデコード
    if ethernet.ethertype != ETHERTYPE_IPV4 {
        let ethertype = ethernet.ethertype;
        return Ok(DecodedFrame {
            ethernet,
            network: NetworkLayer::Unhandled { ethertype },
            transport: None,
            payload: remainder,
        });
    }

    let (ipv4_header, transport_data) = match IPv4Header::parse(remainder) {
        Ok(parsed) => parsed,
        Err(e) => {
            return Ok(DecodedFrame {
                ethernet,
                network: NetworkLayer::Truncated(e),
                transport: None,
                payload: remainder,
            });
        },
    };

    if ipv4_header.version != 4 {
        log::warn!("IPv4イーサタイプのフレームでバージョン{}を検出しました", ipv4_header.version);
    }

    // トランスポート層のデコード
    let (transport, payload) = if ipv4_header.protocol == IP_PROTOCOL_TCP {
        match TCPHeader::parse(transport_data) {
            Ok((tcp_header, payload)) => (TransportLayer::TCP(tcp_header), payload),
            Err(e) => (TransportLayer::Truncated(e), transport_data),
        }
    } else {
        let protocol = ipv4_header.protocol;
        (TransportLayer::Unhandled { protocol }, transport_data)
    };

    Ok(DecodedFrame {
        ethernet,
        network: NetworkLayer::IPv4(ipv4_header),
        transport: Some(transport),
        payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Layer;

    fn ethernet_header(ethertype: u16) -> Vec<u8> {
        let mut frame = vec![
            0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff, // 宛先MAC
            0x11, 0x22, 0x33, 0x44, 0x55, 0x66, // 送信元MAC
        ];
        frame.extend_from_slice(&ethertype.to_be_bytes());
        frame
    }

    fn ipv4_header(protocol: u8, payload_length: u16) -> Vec<u8> {
        let total_length = 20 + payload_length;
        let mut header = vec![0x45, 0x00];
        header.extend_from_slice(&total_length.to_be_bytes());
        header.extend_from_slice(&[
            0x00, 0x01, // 識別子
            0x00, 0x00, // フラグ/フラグメントオフセット
            0x40, protocol, // TTL, プロトコル
            0x00, 0x00, // チェックサム
            192, 168, 0, 2, // 送信元アドレス
            192, 168, 0, 1, // 宛先アドレス
        ]);
        header
    }

    fn tcp_header(offset_reserved_flags: u16) -> Vec<u8> {
        let mut header = vec![
            0xc0, 0x00, // 送信元ポート (49152)
            0x00, 0x50, // 宛先ポート (80)
            0x00, 0x00, 0x00, 0x01, // シーケンス番号
            0x00, 0x00, 0x00, 0x00, // 確認応答番号
        ];
        header.extend_from_slice(&offset_reserved_flags.to_be_bytes());
        header.extend_from_slice(&[
            0xff, 0xff, // ウィンドウサイズ
            0x00, 0x00, // チェックサム
            0x00, 0x00, // 緊急ポインタ
        ]);
        header
    }

    #[test]
    fn test_full_cascade() {
        // 14 + 20 + 20 = 54バイト、TCPデータなし
        let mut frame = ethernet_header(0x0800);
        frame.extend_from_slice(&ipv4_header(6, 20));
        frame.extend_from_slice(&tcp_header(0x5000));
        assert_eq!(frame.len(), 54);

        let decoded = decode_frame(&frame).expect("デコードに失敗しました");

        assert_eq!(decoded.ethernet.ethertype, 0x0800);

        let ipv4 = match &decoded.network {
            NetworkLayer::IPv4(header) => header,
            other => panic!("IPv4としてデコードされませんでした: {:?}", other),
        };
        assert_eq!(ipv4.protocol, 6);

        let tcp = match decoded.transport.as_ref().expect("トランスポート層がありません") {
            TransportLayer::TCP(header) => header,
            other => panic!("TCPとしてデコードされませんでした: {:?}", other),
        };
        assert!(!tcp.flags.urg && !tcp.flags.ack && !tcp.flags.psh);
        assert!(!tcp.flags.rst && !tcp.flags.syn && !tcp.flags.fin);

        assert!(decoded.payload.is_empty());
    }

    #[test]
    fn test_payload_length_through_cascade() {
        let mut frame = ethernet_header(0x0800);
        frame.extend_from_slice(&ipv4_header(6, 25));
        frame.extend_from_slice(&tcp_header(0x5018));
        frame.extend_from_slice(b"hello");

        let decoded = decode_frame(&frame).expect("デコードに失敗しました");

        assert_eq!(decoded.payload, b"hello");
        assert_eq!(decoded.payload.len(), frame.len() - 14 - 20 - 20);
    }

    #[test]
    fn test_unhandled_ethertype_stops_cascade() {
        // ARPフレームはイーサネット層で停止する
        let mut frame = ethernet_header(0x0806);
        frame.extend_from_slice(&[0x00, 0x01, 0x08, 0x00, 0x06, 0x04]);

        let decoded = decode_frame(&frame).expect("デコードに失敗しました");

        assert_eq!(decoded.network, NetworkLayer::Unhandled { ethertype: 0x0806 });
        assert_eq!(decoded.transport, None);
        assert_eq!(decoded.payload, &frame[14..]);
    }

    #[test]
    fn test_unhandled_ip_protocol_stops_cascade() {
        // UDP (17) はトランスポート層で停止する
        let mut frame = ethernet_header(0x0800);
        frame.extend_from_slice(&ipv4_header(17, 8));
        frame.extend_from_slice(&[0x00, 0x35, 0x00, 0x35, 0x00, 0x08, 0x00, 0x00]);

        let decoded = decode_frame(&frame).expect("デコードに失敗しました");

        assert!(matches!(decoded.network, NetworkLayer::IPv4(_)));
        assert_eq!(decoded.transport, Some(TransportLayer::Unhandled { protocol: 17 }));
        assert_eq!(decoded.payload, &frame[34..]);
    }

    #[test]
    fn test_truncated_ethernet_is_fatal() {
        let frame = vec![0u8; 13];

        let result = decode_frame(&frame);
        assert_eq!(
            result,
            Err(DecodeError::TruncatedHeader {
                layer: Layer::Ethernet,
                needed: 14,
                available: 13,
            })
        );
    }

    #[test]
    fn test_truncated_ipv4_keeps_ethernet() {
        let mut frame = ethernet_header(0x0800);
        frame.extend_from_slice(&[0x45; 10]);

        let decoded = decode_frame(&frame).expect("デコードに失敗しました");

        assert_eq!(decoded.ethernet.ethertype, 0x0800);
        assert_eq!(
            decoded.network,
            NetworkLayer::Truncated(DecodeError::TruncatedHeader {
                layer: Layer::Ipv4,
                needed: 20,
                available: 10,
            })
        );
        assert_eq!(decoded.transport, None);
        assert_eq!(decoded.payload, &frame[14..]);
    }

    #[test]
    fn test_truncated_tcp_keeps_upper_layers() {
        let mut frame = ethernet_header(0x0800);
        frame.extend_from_slice(&ipv4_header(6, 8));
        frame.extend_from_slice(&[0x00; 8]);

        let decoded = decode_frame(&frame).expect("デコードに失敗しました");

        assert!(matches!(decoded.network, NetworkLayer::IPv4(_)));
        assert_eq!(
            decoded.transport,
            Some(TransportLayer::Truncated(DecodeError::TruncatedHeader {
                layer: Layer::Tcp,
                needed: 14,
                available: 8,
            }))
        );
        // 切り詰められたレイヤの入力がそのまま未デコードバイト列になる
        assert_eq!(decoded.payload, &frame[34..]);
    }

    #[test]
    fn test_decode_is_idempotent() {
        let mut frame = ethernet_header(0x0800);
        frame.extend_from_slice(&ipv4_header(6, 24));
        frame.extend_from_slice(&tcp_header(0x5010));
        frame.extend_from_slice(&[1, 2, 3, 4]);

        let first = decode_frame(&frame).expect("デコードに失敗しました");
        let second = decode_frame(&frame).expect("デコードに失敗しました");

        assert_eq!(first, second);
    }
}
