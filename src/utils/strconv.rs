// UTF-8 / UTF-16 互转
// 供 WebView2 的宽字符接口使用；严格模式，遇到非法序列返回空结果

/// UTF-16 转 UTF-8
/// 空输入返回空字符串；存在未配对的代理项时返回空字符串
pub fn utf8_from_utf16(utf16: &[u16]) -> String {
    if utf16.is_empty() {
        return String::new();
    }

    // 第一遍：校验并计算所需字节数
    let mut required = 0usize;
    for decoded in char::decode_utf16(utf16.iter().copied()) {
        match decoded {
            Ok(c) => required += c.len_utf8(),
            Err(e) => {
                log::debug!("UTF-16 转换失败，未配对的代理项: {:#06x}", e.unpaired_surrogate());
                return String::new();
            }
        }
    }

    // 第二遍：写入预先分配好的缓冲区
    let mut out = String::with_capacity(required);
    out.extend(char::decode_utf16(utf16.iter().copied()).filter_map(Result::ok));
    out
}

/// UTF-8 转 UTF-16
/// 空输入返回空数组；非法 UTF-8 字节序列返回空数组
pub fn utf16_from_utf8(utf8: &[u8]) -> Vec<u16> {
    if utf8.is_empty() {
        return Vec::new();
    }

    let s = match std::str::from_utf8(utf8) {
        Ok(s) => s,
        Err(e) => {
            log::debug!("UTF-8 转换失败，位置 {}", e.valid_up_to());
            return Vec::new();
        }
    };

    let required: usize = s.chars().map(char::len_utf16).sum();
    let mut out = Vec::with_capacity(required);
    out.extend(s.encode_utf16());
    out
}

/// 生成以 0 结尾的宽字符串，用于传给 LPCWSTR 参数
pub fn to_wide_nul(s: &str) -> Vec<u16> {
    let mut wide = utf16_from_utf8(s.as_bytes());
    wide.push(0);
    wide
}

/// 读取以 0 结尾的宽字符串，没有结尾 0 时使用整个缓冲区
pub fn from_wide_nul(wide: &[u16]) -> String {
    let len = wide.iter().position(|c| *c == 0).unwrap_or(wide.len());
    utf8_from_utf16(&wide[..len])
}
