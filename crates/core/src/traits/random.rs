//! 随机数来源抽象
//!
//! 错误率注入、被杀Pod的挑选、Pod名称后缀都通过 `RandomSource` 取随机数，
//! 以便测试中用固定种子或固定序列控制结果。

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 随机数来源
pub trait RandomSource: Send + Sync {
    /// `[0, 1)` 区间内的浮点数
    fn next_f64(&self) -> f64;

    /// `[low, high)` 区间内的浮点数
    fn range_f64(&self, low: f64, high: f64) -> f64 {
        low + self.next_f64() * (high - low)
    }

    /// `[0, upper)` 区间内的整数，`upper` 为0时返回0
    fn below(&self, upper: u64) -> u64 {
        if upper == 0 {
            return 0;
        }
        let value = (self.next_f64() * upper as f64).floor() as u64;
        value.min(upper - 1)
    }

    /// 以概率 `probability` 返回 true
    fn chance(&self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// 从长度为 `len` 的集合中均匀挑选一个下标
    fn pick_index(&self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.below(len as u64) as usize)
        }
    }

    /// 由小写字母和数字组成的随机后缀
    fn suffix(&self, len: usize) -> String {
        const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
        (0..len)
            .map(|_| ALPHABET[self.below(ALPHABET.len() as u64) as usize] as char)
            .collect()
    }
}

/// 基于线程本地随机数生成器的来源
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandomSource;

impl RandomSource for ThreadRandomSource {
    fn next_f64(&self) -> f64 {
        rand::rng().random::<f64>()
    }
}

/// 固定种子的可复现来源
#[derive(Debug)]
pub struct SeededRandomSource {
    rng: Mutex<StdRng>,
}

impl SeededRandomSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandomSource {
    fn next_f64(&self) -> f64 {
        match self.rng.lock() {
            Ok(mut rng) => rng.random::<f64>(),
            Err(poisoned) => poisoned.into_inner().random::<f64>(),
        }
    }
}

/// 按给定序列循环返回数值的来源，用于测试中精确控制随机分支
#[derive(Debug)]
pub struct SequenceRandomSource {
    values: Vec<f64>,
    cursor: Mutex<usize>,
}

impl SequenceRandomSource {
    /// 序列为空时恒返回0.0；超出 `[0, 1)` 的值会被截断到区间内
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            cursor: Mutex::new(0),
        }
    }

    /// 恒返回同一个值
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceRandomSource {
    fn next_f64(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let mut cursor = match self.cursor.lock() {
            Ok(cursor) => cursor,
            Err(poisoned) => poisoned.into_inner(),
        };
        let value = self.values[*cursor % self.values.len()];
        *cursor += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_source_is_reproducible() {
        let a = SeededRandomSource::new(42);
        let b = SeededRandomSource::new(42);
        let left: Vec<f64> = (0..8).map(|_| a.next_f64()).collect();
        let right: Vec<f64> = (0..8).map(|_| b.next_f64()).collect();
        assert_eq!(left, right);
        assert!(left.iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn test_sequence_source_cycles() {
        let source = SequenceRandomSource::new(vec![0.1, 0.9]);
        assert_eq!(source.next_f64(), 0.1);
        assert_eq!(source.next_f64(), 0.9);
        assert_eq!(source.next_f64(), 0.1);
    }

    #[test]
    fn test_below_stays_in_bounds() {
        let source = SequenceRandomSource::new(vec![0.0, 0.5, 0.999_999]);
        assert_eq!(source.below(100), 0);
        assert_eq!(source.below(100), 50);
        assert_eq!(source.below(100), 99);
        assert_eq!(source.below(0), 0);
    }

    #[test]
    fn test_pick_index() {
        let source = SequenceRandomSource::constant(0.75);
        assert_eq!(source.pick_index(0), None);
        assert_eq!(source.pick_index(2), Some(1));
        assert_eq!(source.pick_index(4), Some(3));
    }

    #[test]
    fn test_chance_threshold() {
        assert!(SequenceRandomSource::constant(0.01).chance(0.05));
        assert!(!SequenceRandomSource::constant(0.5).chance(0.05));
        assert!(!SequenceRandomSource::constant(0.0).chance(0.0));
    }

    #[test]
    fn test_suffix_alphabet() {
        let suffix = ThreadRandomSource.suffix(6);
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }
}
