//! 工程量清单导出
//!
//! 导出文档与清单的类别映射结构一致，由编辑后的副本原样序列化。
//! 文件名由项目名生成：空白替换为下划线，后缀 `_BOQ.json`。
//! 路径分隔符同样替换为下划线，导出文件总是落在目标目录内。

use crate::error::FileError;
use floorcad_core::boq::BoqWorkingCopy;
use std::fs;
use std::path::{Path, PathBuf};

/// 导出文件名后缀
pub const EXPORT_SUFFIX: &str = "_BOQ.json";

/// 由项目名生成导出文件名，连续空白合并为一个下划线
pub fn export_filename(project_name: &str) -> String {
    let mut name = String::with_capacity(project_name.len() + EXPORT_SUFFIX.len());
    let mut in_whitespace = false;
    for c in project_name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                name.push('_');
            }
            in_whitespace = true;
        } else {
            name.push(if is_separator(c) { '_' } else { c });
            in_whitespace = false;
        }
    }
    name.push_str(EXPORT_SUFFIX);
    name
}

fn is_separator(c: char) -> bool {
    matches!(c, '/' | '\\')
}

/// 序列化为 JSON 文本
pub fn to_json(copy: &BoqWorkingCopy) -> Result<String, FileError> {
    Ok(serde_json::to_string_pretty(copy.boq())?)
}

/// 写入 `dir/<项目名>_BOQ.json`，返回文件路径
pub fn write_boq(
    dir: &Path,
    project_name: &str,
    copy: &BoqWorkingCopy,
) -> Result<PathBuf, FileError> {
    let path = dir.join(export_filename(project_name));
    let json = to_json(copy)?;
    fs::write(&path, &json)?;

    tracing::info!(
        "Exported BOQ ({} line(s), total {:.2}) to {} ({} bytes)",
        copy.boq().item_count(),
        copy.grand_total(),
        path.display(),
        json.len()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorcad_core::boq::{Boq, BoqItem};

    fn sample_copy() -> BoqWorkingCopy {
        let mut boq = Boq::new();
        boq.add_item("Doors", BoqItem::new("Door (standard)", "80 x 200 cm", 2, 250.0));
        boq.add_item("Walls", BoqItem::new("Wall A", "300 x 270 x 10 cm", 1, 364.5));
        BoqWorkingCopy::new(&boq)
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename("My Kitchen"), "My_Kitchen_BOQ.json");
        assert_eq!(export_filename("  Flat\t 12  "), "_Flat_12__BOQ.json");
        assert_eq!(export_filename("Studio"), "Studio_BOQ.json");
    }

    #[test]
    fn test_export_filename_strips_separators() {
        assert_eq!(export_filename("../escaped"), ".._escaped_BOQ.json");
        assert_eq!(export_filename("a/b\\c"), "a_b_c_BOQ.json");
        assert_eq!(export_filename("/etc/passwd"), "_etc_passwd_BOQ.json");
    }

    #[test]
    fn test_write_boq_stays_in_dir() {
        let dir = std::env::temp_dir()
            .join(format!("floorcad_export_{}", std::process::id()))
            .join("inner");
        std::fs::create_dir_all(&dir).expect("Failed to create dir");

        let path = write_boq(&dir, "../escaped", &sample_copy()).expect("Failed to export");
        assert_eq!(path.parent(), Some(dir.as_path()));
        assert!(path.exists());
        assert!(!dir.parent().map(|p| p.join("escaped_BOQ.json").exists()).unwrap_or(false));

        if let Some(root) = dir.parent() {
            std::fs::remove_dir_all(root).ok();
        }
    }

    #[test]
    fn test_export_reflects_edits() {
        let mut copy = sample_copy();
        copy.set_quantity("Doors", 0, "3").unwrap();
        // 无效输入被忽略
        let _ = copy.set_price("Doors", 0, "abc");

        let json: serde_json::Value = serde_json::from_str(&to_json(&copy).unwrap()).unwrap();
        assert_eq!(json["Doors"][0]["quantity"], 3);
        assert_eq!(json["Doors"][0]["price"], 250.0);
        assert_eq!(json["Walls"][0]["dimensions"], "300 x 270 x 10 cm");
    }

    #[test]
    fn test_write_boq() {
        let dir = std::env::temp_dir();
        let copy = sample_copy();

        let path = write_boq(&dir, "Test Project", &copy).expect("Failed to export");
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("Test_Project_BOQ.json"));

        let text = std::fs::read_to_string(&path).expect("Failed to read");
        let loaded: Boq = serde_json::from_str(&text).expect("Failed to parse");
        assert_eq!(&loaded, copy.boq());

        std::fs::remove_file(&path).ok();
    }
}
