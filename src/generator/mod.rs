// ==========================================
// Sheet Seed - 值生成器
// ==========================================
// 职责: 为配置列逐行提供值（如序列主键）
// 红线: 导入核心只负责传递生成器，从不调用；
//       由执行层每行调用一次
// ==========================================

pub mod sequence;

pub use sequence::{date_sequence, sequence, string_sequence};
pub use sequence::{DateSequenceGenerator, SequenceGenerator, StringSequenceGenerator};

use crate::domain::cell::Value;
use std::fmt;
use std::sync::{Arc, Mutex};

// ==========================================
// ValueGenerator Trait
// ==========================================
pub trait ValueGenerator: Send {
    /// 生成下一个值（每次调用推进内部状态）
    fn next_value(&mut self) -> Value;
}

impl<F> ValueGenerator for F
where
    F: FnMut() -> Value + Send,
{
    fn next_value(&mut self) -> Value {
        self()
    }
}

// ==========================================
// GeneratorHandle - 共享生成器句柄
// ==========================================
// 相等性 = 同一个生成器实例
#[derive(Clone)]
pub struct GeneratorHandle {
    inner: Arc<Mutex<dyn ValueGenerator>>,
}

impl GeneratorHandle {
    pub fn new<G: ValueGenerator + 'static>(generator: G) -> Self {
        Self {
            inner: Arc::new(Mutex::new(generator)),
        }
    }

    /// 调用生成器一次
    ///
    /// # 返回
    /// - Err: 生成器锁已中毒（之前的调用发生 panic）
    pub fn next_value(&self) -> Result<Value, String> {
        let mut generator = self
            .inner
            .lock()
            .map_err(|e| format!("生成器锁获取失败: {}", e))?;
        Ok(generator.next_value())
    }
}

impl PartialEq for GeneratorHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for GeneratorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GeneratorHandle({:p})", Arc::as_ptr(&self.inner) as *const ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_generator() {
        let mut n = 0;
        let handle = GeneratorHandle::new(move || {
            n += 10;
            Value::Integer(n)
        });

        assert_eq!(handle.next_value().unwrap(), Value::Integer(10));
        assert_eq!(handle.next_value().unwrap(), Value::Integer(20));
    }

    #[test]
    fn test_handle_identity() {
        let a = GeneratorHandle::new(sequence());
        let b = GeneratorHandle::new(sequence());
        let a2 = a.clone();

        assert_eq!(a, a2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_shared_state_between_clones() {
        let a = GeneratorHandle::new(sequence());
        let a2 = a.clone();

        assert_eq!(a.next_value().unwrap(), Value::Integer(1));
        assert_eq!(a2.next_value().unwrap(), Value::Integer(2));
    }
}
