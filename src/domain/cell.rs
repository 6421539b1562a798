// ==========================================
// Sheet Seed - 单元格与值
// ==========================================
// Cell: 工作簿中的原始单元格（带类型标签）
// Value: 强制转换后的规范值，直接交给插入操作
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Cell - 原始单元格
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// 数值；date_formatted 为真时表示日期格式的序列值
    Numeric { value: f64, date_formatted: bool },
    Text(String),
    Boolean(bool),
    /// 公式文本（不含前导 '='），由 FormulaEvaluator 解析
    Formula(String),
    Blank,
    /// 错误值（如 "#DIV/0!"）
    Error(String),
    /// 无法识别的单元格类型，携带来源类型名
    Unsupported(String),
}

impl Cell {
    pub fn number(value: f64) -> Self {
        Cell::Numeric {
            value,
            date_formatted: false,
        }
    }

    pub fn date_serial(value: f64) -> Self {
        Cell::Numeric {
            value,
            date_formatted: true,
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn formula(value: impl Into<String>) -> Self {
        Cell::Formula(value.into())
    }

    pub fn error(code: impl Into<String>) -> Self {
        Cell::Error(code.into())
    }
}

// ==========================================
// Value - 规范值
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Number(f64),
    DateTime(NaiveDateTime),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Number(n) => write!(f, "{}", n),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.f")),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::DateTime(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

// 配置文件中的 JSON 字面量 → Value
// 数组/对象没有对应的列值，按 JSON 文本处理
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Text(s),
            other => Value::Text(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_from_json() {
        assert_eq!(Value::from(json!(null)), Value::Null);
        assert_eq!(Value::from(json!(true)), Value::Boolean(true));
        assert_eq!(Value::from(json!(42)), Value::Integer(42));
        assert_eq!(Value::from(json!(1.5)), Value::Number(1.5));
        assert_eq!(Value::from(json!("G")), Value::Text("G".to_string()));
    }

    #[test]
    fn test_value_from_option() {
        assert_eq!(Value::from(None::<&str>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".to_string()));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Number(1.5).to_string(), "1.5");
        assert_eq!(Value::Text("abc".to_string()).to_string(), "abc");
    }
}
