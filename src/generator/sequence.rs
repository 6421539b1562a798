// ==========================================
// Sheet Seed - 序列生成器
// ==========================================
// sequence():        1, 2, 3, ...
// string_sequence(): "CODE-1", "CODE-2", ...（可左补零）
// date_sequence():   2000-01-01, 2000-01-02, ...
// ==========================================

use crate::domain::cell::Value;
use crate::generator::ValueGenerator;
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// 整数序列（默认从 1 开始，步长 1）
pub fn sequence() -> SequenceGenerator {
    SequenceGenerator::default()
}

/// 带前缀的字符串序列
pub fn string_sequence(prefix: impl Into<String>) -> StringSequenceGenerator {
    StringSequenceGenerator::new(prefix)
}

/// 日期时间序列（默认从 2000-01-01 00:00:00 开始，步长 1 天）
pub fn date_sequence() -> DateSequenceGenerator {
    DateSequenceGenerator::default()
}

// ==========================================
// SequenceGenerator
// ==========================================
#[derive(Debug, Clone)]
pub struct SequenceGenerator {
    next: i64,
    increment: i64,
}

impl Default for SequenceGenerator {
    fn default() -> Self {
        Self {
            next: 1,
            increment: 1,
        }
    }
}

impl SequenceGenerator {
    pub fn starting_at(mut self, start: i64) -> Self {
        self.next = start;
        self
    }

    pub fn incrementing_by(mut self, increment: i64) -> Self {
        self.increment = increment;
        self
    }

    fn advance(&mut self) -> i64 {
        let current = self.next;
        self.next = self.next.wrapping_add(self.increment);
        current
    }
}

impl ValueGenerator for SequenceGenerator {
    fn next_value(&mut self) -> Value {
        Value::Integer(self.advance())
    }
}

// ==========================================
// StringSequenceGenerator
// ==========================================
#[derive(Debug, Clone)]
pub struct StringSequenceGenerator {
    prefix: String,
    sequence: SequenceGenerator,
    padding: usize,
}

impl StringSequenceGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            sequence: SequenceGenerator::default(),
            padding: 0,
        }
    }

    pub fn starting_at(mut self, start: i64) -> Self {
        self.sequence = self.sequence.starting_at(start);
        self
    }

    pub fn incrementing_by(mut self, increment: i64) -> Self {
        self.sequence = self.sequence.incrementing_by(increment);
        self
    }

    /// 数字部分左补零到指定宽度
    pub fn with_left_padding(mut self, width: usize) -> Self {
        self.padding = width;
        self
    }
}

impl ValueGenerator for StringSequenceGenerator {
    fn next_value(&mut self) -> Value {
        let n = self.sequence.advance();
        Value::Text(format!("{}{:0width$}", self.prefix, n, width = self.padding))
    }
}

// ==========================================
// DateSequenceGenerator
// ==========================================
#[derive(Debug, Clone)]
pub struct DateSequenceGenerator {
    next: NaiveDateTime,
    increment: Duration,
}

impl Default for DateSequenceGenerator {
    fn default() -> Self {
        let start = NaiveDate::from_ymd_opt(2000, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or_default();
        Self {
            next: start,
            increment: Duration::days(1),
        }
    }
}

impl DateSequenceGenerator {
    pub fn starting_at(mut self, start: NaiveDateTime) -> Self {
        self.next = start;
        self
    }

    pub fn incrementing_by(mut self, increment: Duration) -> Self {
        self.increment = increment;
        self
    }
}

impl ValueGenerator for DateSequenceGenerator {
    fn next_value(&mut self) -> Value {
        let current = self.next;
        self.next = current
            .checked_add_signed(self.increment)
            .unwrap_or(current);
        Value::DateTime(current)
    }
}
