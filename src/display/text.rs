use crate::network::packet::{DecodedFrame, NetworkLayer, TransportLayer};

pub fn print_frame(decoded: &DecodedFrame, show_payload: bool) {
    println!();
    println!("Ethernet Frame:");
    println!(
        "\t- 宛先: {}, 送信元: {}, イーサタイプ: 0x{:04x}",
        format_mac(&decoded.ethernet.destination),
        format_mac(&decoded.ethernet.source),
        decoded.ethernet.ethertype,
    );

    match &decoded.network {
        NetworkLayer::IPv4(ipv4) => {
            println!("\t- IPv4 Packet:");
            println!(
                "\t\t- バージョン: {}, ヘッダー長: {}, TTL: {}",
                ipv4.version, ipv4.header_length, ipv4.ttl,
            );
            println!(
                "\t\t- プロトコル: {}, 送信元: {}, 宛先: {}",
                ipv4.protocol, ipv4.source, ipv4.destination,
            );
        },
        NetworkLayer::Unhandled { ethertype } => {
            println!(
                "\t- 未対応のイーサタイプ 0x{:04x}: ペイロード{}バイト",
                ethertype,
                decoded.payload.len(),
            );
            return;
        },
        NetworkLayer::Truncated(e) => {
            println!("\t- {}", e);
            return;
        },
    }

    match &decoded.transport {
        Some(TransportLayer::TCP(tcp)) => {
            println!("\t\t- TCP Segment:");
            println!(
                "\t\t\t- 送信元ポート: {}, 宛先ポート: {}",
                tcp.source_port, tcp.destination_port,
            );
            println!(
                "\t\t\t- シーケンス番号: {}, 確認応答番号: {}",
                tcp.sequence_number, tcp.acknowledgment_number,
            );
            println!("\t\t\t- フラグ:");
            println!(
                "\t\t\t\t- URG: {}, ACK: {}, PSH: {}",
                tcp.flags.urg, tcp.flags.ack, tcp.flags.psh,
            );
            println!(
                "\t\t\t\t- RST: {}, SYN: {}, FIN: {}",
                tcp.flags.rst, tcp.flags.syn, tcp.flags.fin,
            );

            if show_payload && !decoded.payload.is_empty() {
                println!("\t\t\t- TCPデータ:");
                print!("{}", format_payload_lines("\t\t\t\t", decoded.payload));
            }
        },
        Some(TransportLayer::Unhandled { protocol }) => {
            println!(
                "\t\t- 未対応のプロトコル {}: ペイロード{}バイト",
                protocol,
                decoded.payload.len(),
            );
        },
        Some(TransportLayer::Truncated(e)) => {
            println!("\t\t- {}", e);
        },
        None => {},
    }
}

pub fn format_mac(mac: &[u8; 6]) -> String {
    format!(
        "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
        mac[0], mac[1], mac[2], mac[3], mac[4], mac[5]
    )
}

// ペイロードを非可逆的にUTF-8として解釈し、各行にプレフィックスを付けて返す
pub fn format_payload_lines(prefix: &str, payload: &[u8]) -> String {
    let text = String::from_utf8_lossy(payload);
    let mut formatted = String::new();
    for line in text.lines() {
        formatted.push_str(prefix);
        formatted.push_str(line);
        formatted.push('\n');
    }
    formatted
}
