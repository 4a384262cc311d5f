// 把标准编码的平台通道消息解码为 JSON，便于排查 Dart <-> 原生通信
//
// 用法: decode-message [--hex] [MESSAGE]
// 未给出 MESSAGE 时从标准输入读取；默认输入为 base64

use std::io::Read;
use std::process::ExitCode;

use base64::{engine::general_purpose, Engine as _};
use inappwebview_bridge_lib::StandardMessageCodec;

enum InputFormat {
    Base64,
    Hex,
}

fn decode_input(format: &InputFormat, input: &str) -> Result<Vec<u8>, String> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    match format {
        InputFormat::Base64 => general_purpose::STANDARD
            .decode(compact)
            .map_err(|e| format!("Invalid base64 input: {}", e)),
        InputFormat::Hex => hex::decode(compact).map_err(|e| format!("Invalid hex input: {}", e)),
    }
}

fn run() -> Result<String, String> {
    let mut format = InputFormat::Base64;
    let mut message = None;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--hex" => format = InputFormat::Hex,
            "--base64" => format = InputFormat::Base64,
            _ if message.is_none() => message = Some(arg),
            _ => return Err(format!("Unexpected argument: {}", arg)),
        }
    }

    let input = match message {
        Some(message) => message,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("Failed to read stdin: {}", e))?;
            buf
        }
    };

    let bytes = decode_input(&format, &input)?;
    let value = StandardMessageCodec
        .decode_message(&bytes)
        .map_err(|e| format!("Failed to decode message: {}", e))?;

    serde_json::to_string_pretty(&value).map_err(|e| format!("Failed to format JSON: {}", e))
}

fn main() -> ExitCode {
    match run() {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
