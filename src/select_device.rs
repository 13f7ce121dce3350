use pnet::datalink;
use std::io::{self, Write};

pub fn select_device(preferred_interface: &str) -> Result<datalink::NetworkInterface, Box<dyn std::error::Error>> {
    let interfaces = datalink::interfaces();

    // 設定でインターフェース名が指定されていれば名前で解決する
    if !preferred_interface.is_empty() {
        return interfaces
            .into_iter()
            .find(|interface| interface.name == preferred_interface)
            .ok_or_else(|| format!("指定されたデバイスが見つかりません: {}", preferred_interface).into());
    }

    println!("利用可能なデバイス:");
    for (index, interface) in interfaces.iter().enumerate() {
        println!("{}. {}", index + 1, interface.name);
    }

    print!("キャプチャするデバイスの番号を入力してください: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let device_index: usize = input.trim().parse()?;

    if device_index == 0 || device_index > interfaces.len() {
        return Err("無効なデバイス番号です".into());
    }

    let selected_interface = interfaces[device_index - 1].clone();
    println!("選択されたデバイス: {}", selected_interface.name);

    Ok(selected_interface)
}
