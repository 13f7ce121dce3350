use crate::config::AppConfig;
use crate::error::{AppError, InitProcessError};
use crate::monitor::run_monitor;
use crate::select_device::select_device;
use crate::setup_logger::setup_logger;
use tokio::task;

mod config;
mod display;
mod error;
mod monitor;
mod network;
mod select_device;
mod setup_logger;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    setup_logger().map_err(|e| InitProcessError::LoggerSetupError(e.to_string()))?;

    let config = AppConfig::from_env()?;

    // デバイスの選択
    let interface = select_device(&config.network.interface)
        .map_err(|e| InitProcessError::DeviceSelectionError(e.to_string()))?;
    println!("デバイスの選択に成功しました: {}", interface.name);

    // キャプチャループはブロッキングするため専用スレッドで回す
    let monitor = task::spawn_blocking(move || run_monitor(interface, config));

    tokio::select! {
        result = monitor => match result {
            Ok(Err(e)) => println!("パケットの解析に失敗しました: {}", e),
            Err(e) => println!("監視タスクが異常終了しました: {}", e),
            _ => {},
        },
        _ = tokio::signal::ctrl_c() => {
            log::info!("停止シグナルを受信しました。終了します");
        },
    }

    Ok(())
}
