pub mod record;
pub mod text;

pub use record::FrameRecord;

use crate::config::{OutputConfig, OutputFormat};
use crate::network::packet::DecodedFrame;

pub fn emit(decoded: &DecodedFrame, interface: &str, frame_length: usize, config: &OutputConfig) {
    match config.format {
        OutputFormat::Text => text::print_frame(decoded, config.show_payload),
        OutputFormat::Json => {
            let record = FrameRecord::from_decoded(decoded, interface, frame_length);
            match serde_json::to_string(&record) {
                Ok(json) => println!("{}", json),
                Err(e) => log::error!("レコードのシリアライズに失敗しました: {}", e),
            }
        },
    }
}
