use crate::config::AppConfig;
use crate::display;
use crate::error::AppError;
use crate::network::packet::decode_frame;
use crate::network::PacketCapture;
use pnet::datalink::NetworkInterface;

pub fn run_monitor(interface: NetworkInterface, config: AppConfig) -> Result<(), AppError> {
    let mut capture = PacketCapture::open(&interface, config.network.packet_buffer_size)?;
    let interface_name = capture.interface_name().to_string();
    log::info!("パケットキャプチャを開始しました: {}", interface_name);

    loop {
        match capture.next_frame() {
            Ok(frame) => match decode_frame(frame) {
                Ok(decoded) => display::emit(&decoded, &interface_name, frame.len(), &config.output),
                // イーサネットヘッダーに満たないフレームは読み飛ばす
                Err(e) => log::warn!("フレームのデコードに失敗しました: {}", e),
            },
            Err(e) => eprintln!("パケットの読み取り中にエラーが発生しました: {}", e),
        }
    }
}
