//! フィールド重み
//!
//! 主要素を最も重く、暴露条件を最も軽く見る。合計は1.0。

use crate::similarity::FieldScore;
use crate::types::Field;

pub const DEFAULT_WEIGHTS: Weights = Weights {
    host: 0.45,
    adjacent: 0.35,
    exposure: 0.20,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub host: f64,
    pub adjacent: f64,
    pub exposure: f64,
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.host + self.adjacent + self.exposure
    }

    pub fn for_field(&self, field: Field) -> f64 {
        match field {
            Field::Host => self.host,
            Field::Adjacent => self.adjacent,
            Field::Exposure => self.exposure,
        }
    }

    /// 加重和。重みが凸結合なので結果は [0.0, 1.0]
    pub fn aggregate(&self, scores: &[FieldScore]) -> f64 {
        scores
            .iter()
            .map(|s| self.for_field(s.field) * s.score())
            .sum::<f64>()
            .clamp(0.0, 1.0)
    }
}

impl Default for Weights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}
