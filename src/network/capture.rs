use crate::error::AppError;
use pnet::datalink::{self, Channel, DataLinkReceiver, NetworkInterface};

pub struct PacketCapture {
    interface_name: String,
    rx: Box<dyn DataLinkReceiver>,
}

impl PacketCapture {
    pub fn open(interface: &NetworkInterface, buffer_size: usize) -> Result<Self, AppError> {
        let config = datalink::Config {
            read_buffer_size: buffer_size,
            ..Default::default()
        };

        let (_, rx) = match datalink::channel(interface, config) {
            Ok(Channel::Ethernet(tx, rx)) => (tx, rx),
            Ok(_) => {
                return Err(AppError::Capture(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "未サポートのチャネルタイプです",
                )))
            },
            Err(e) => return Err(AppError::Capture(e)),
        };

        Ok(Self {
            interface_name: interface.name.clone(),
            rx,
        })
    }

    pub fn interface_name(&self) -> &str {
        &self.interface_name
    }

    // 次のリンク層フレームを1つ返す。次のフレームが届くまでブロックする
    pub fn next_frame(&mut self) -> Result<&[u8], AppError> {
        self.rx.next().map_err(AppError::Capture)
    }
}
