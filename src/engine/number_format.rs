// ==========================================
// 合同登记转换 - 区域数字格式化
// ==========================================
// 职责: 数值 → 带千位分隔符的文本
// 规则: 最多 3 位小数, 去除尾随零
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 最多保留的小数位数
const MAX_FRACTION_DIGITS: usize = 3;

/// 超过该量级不再有小数部分
const EXACT_TIE_LIMIT: f64 = 1e20;

// ==========================================
// NumberLocale - 运行区域
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberLocale {
    /// 1,234.5
    #[default]
    En,
    /// 1.234,5（四位整数不分组: 1234,5）
    Es,
}

impl NumberLocale {
    fn group_separator(&self) -> char {
        match self {
            NumberLocale::En => ',',
            NumberLocale::Es => '.',
        }
    }

    fn decimal_separator(&self) -> char {
        match self {
            NumberLocale::En => '.',
            NumberLocale::Es => ',',
        }
    }

    /// 整数部分达到该位数才分组
    fn min_grouping_digits(&self) -> usize {
        match self {
            NumberLocale::En => 4,
            NumberLocale::Es => 5,
        }
    }

    /// 按区域格式化数值
    ///
    /// 非有限值（NaN / ∞）原样输出
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }

        let fixed = fixed_fraction(value.abs());
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
        let frac_part = frac_part.trim_end_matches('0');

        let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();

        let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
        if value < 0.0 && !is_zero {
            out.push('-');
        }
        out.push_str(&self.group(int_part));
        if !frac_part.is_empty() {
            out.push(self.decimal_separator());
            out.push_str(frac_part);
        }
        out
    }

    fn group(&self, digits: &str) -> String {
        if digits.len() < self.min_grouping_digits() {
            return digits.to_string();
        }

        let sep = self.group_separator();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (idx, ch) in digits.chars().enumerate() {
            if idx > 0 && (digits.len() - idx) % 3 == 0 {
                out.push(sep);
            }
            out.push(ch);
        }
        out
    }
}

/// 非负数保留 3 位小数, 恰好居中时远离零舍入
///
/// 第 4 位小数恰为 5 的二进制值必为 1/16 的整数倍, 此时按整数运算;
/// 其余情况不存在精确居中, 交给标准格式化
fn fixed_fraction(abs: f64) -> String {
    let sixteenths = abs * 16.0;
    if sixteenths.fract() == 0.0 && abs < EXACT_TIE_LIMIT {
        let ten_thousandths = sixteenths as u128 * 625;
        let thousandths = (ten_thousandths + 5) / 10;
        return format!(
            "{}.{:0width$}",
            thousandths / 1000,
            thousandths % 1000,
            width = MAX_FRACTION_DIGITS
        );
    }
    format!("{:.*}", MAX_FRACTION_DIGITS, abs)
}

impl fmt::Display for NumberLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberLocale::En => write!(f, "en"),
            NumberLocale::Es => write!(f, "es"),
        }
    }
}

impl FromStr for NumberLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "en-us" | "en_us" => Ok(NumberLocale::En),
            "es" | "es-es" | "es_es" => Ok(NumberLocale::Es),
            other => Err(format!("不支持的区域: {}（可选 en / es）", other)),
        }
    }
}
