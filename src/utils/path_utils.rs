use crate::error::BridgeError;
use std::path::{Path, PathBuf};

/// 路径工具函数
pub struct PathUtils;

impl PathUtils {
    /// 展开路径中的 ~ 到用户主目录
    ///
    /// # 示例
    /// ```rust
    /// // "~" -> "/home/username"
    /// // "~/Downloads/f.bin" -> "/home/username/Downloads/f.bin"
    /// // "/absolute/path" -> "/absolute/path" (不变)
    /// ```
    pub fn expand_home_dir(path: &str) -> Result<PathBuf, BridgeError> {
        if !path.starts_with('~') {
            return Ok(PathBuf::from(path));
        }

        let home_dir = dirs::home_dir().ok_or(BridgeError::HomeDirUnavailable)?;
        if path == "~" {
            Ok(home_dir)
        } else if let Some(stripped) = path.strip_prefix("~/") {
            Ok(home_dir.join(stripped))
        } else {
            // ~username 形式不支持，原样返回
            Ok(PathBuf::from(path))
        }
    }

    /// 只保留文件名部分，去掉网页可能带来的目录穿越
    pub fn sanitize_file_name(name: &str) -> Option<String> {
        let normalized = name.replace('\\', "/");
        Path::new(&normalized)
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::trim)
            .filter(|n| !n.is_empty() && *n != "." && *n != "..")
            .map(str::to_string)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn absolute_path_is_unchanged() {
        assert_eq!(
            PathUtils::expand_home_dir("/tmp/f.bin").unwrap(),
            PathBuf::from("/tmp/f.bin")
        );
        assert_eq!(
            PathUtils::expand_home_dir("~bob/x").unwrap(),
            PathBuf::from("~bob/x")
        );
    }

    #[test]
    fn tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(PathUtils::expand_home_dir("~").unwrap(), home);
            assert_eq!(
                PathUtils::expand_home_dir("~/Downloads/a.zip").unwrap(),
                home.join("Downloads/a.zip")
            );
        }
    }

    #[test]
    fn sanitize_strips_directories() {
        assert_eq!(PathUtils::sanitize_file_name("../../etc/passwd").as_deref(), Some("passwd"));
        assert_eq!(PathUtils::sanitize_file_name("..\\evil.exe").as_deref(), Some("evil.exe"));
        assert_eq!(PathUtils::sanitize_file_name("report.pdf").as_deref(), Some("report.pdf"));
        assert_eq!(PathUtils::sanitize_file_name(".."), None);
        assert_eq!(PathUtils::sanitize_file_name("dir/"), Some("dir".to_string()));
        assert_eq!(PathUtils::sanitize_file_name(""), None);
    }
}
