// ==========================================
// 合同登记转换 - 数据清洗器
// ==========================================
// 职责: TRIM / NULL 标准化 / 类型推断（数字、布尔）
// ==========================================

use crate::domain::types::CellValue;

pub struct DataCleaner;

impl DataCleaner {
    /// 表头清洗（TRIM）
    pub fn clean_header(&self, value: &str) -> String {
        value.trim().to_string()
    }

    /// 字段值类型推断
    ///
    /// - 空白 → Absent
    /// - true/false（不区分大小写）→ Bool
    /// - 纯十进制数字 → Number
    /// - 其他 → Text（已 TRIM）
    pub fn infer_value(&self, raw: &str) -> CellValue {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Absent;
        }
        if trimmed.eq_ignore_ascii_case("true") {
            return CellValue::Bool(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return CellValue::Bool(false);
        }
        if Self::looks_numeric(trimmed) {
            if let Ok(n) = trimmed.parse::<f64>() {
                if n.is_finite() {
                    return CellValue::Number(n);
                }
            }
        }
        CellValue::Text(trimmed.to_string())
    }

    /// 形如 -?(0|[1-9]\d*)(\.\d+)?
    ///
    /// 前导零（如 "007"）保留为文本, 避免编号被改写
    fn looks_numeric(value: &str) -> bool {
        let unsigned = value.strip_prefix('-').unwrap_or(value);
        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (unsigned, None),
        };

        if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        if int_part.len() > 1 && int_part.starts_with('0') {
            return false;
        }
        match frac_part {
            Some(f) => !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_blank_as_absent() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.infer_value(""), CellValue::Absent);
        assert_eq!(cleaner.infer_value("   "), CellValue::Absent);
    }

    #[test]
    fn test_infer_numbers() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.infer_value("1234.5"), CellValue::Number(1234.5));
        assert_eq!(cleaner.infer_value("-12"), CellValue::Number(-12.0));
        assert_eq!(cleaner.infer_value("0.25"), CellValue::Number(0.25));
        assert_eq!(cleaner.infer_value(" 42 "), CellValue::Number(42.0));
    }

    #[test]
    fn test_infer_keeps_codes_as_text() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.infer_value("007"), CellValue::from("007"));
        assert_eq!(cleaner.infer_value("1.234,50"), CellValue::from("1.234,50"));
        assert_eq!(cleaner.infer_value("1e5"), CellValue::from("1e5"));
        assert_eq!(cleaner.infer_value("+5"), CellValue::from("+5"));
        assert_eq!(cleaner.infer_value("2016/001"), CellValue::from("2016/001"));
        assert_eq!(cleaner.infer_value("5."), CellValue::from("5."));
    }

    #[test]
    fn test_infer_booleans() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.infer_value("TRUE"), CellValue::Bool(true));
        assert_eq!(cleaner.infer_value("false"), CellValue::Bool(false));
        assert_eq!(cleaner.infer_value("SI"), CellValue::from("SI"));
    }

    #[test]
    fn test_clean_header_trims() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.clean_header("  CIF Adjudicatario "), "CIF Adjudicatario");
    }
}
