//! The runtime [`Value`] type: literals, defaults, and the bounds stored in
//! column statistics. Implements a total order across heterogeneous variants
//! so the planner can run a three-way compare for partial-index predicate
//! implication and for histogram/min-max bookkeeping, without requiring the
//! two operands to share a concrete representation (e.g. comparing an
//! `Integer` literal against a `Decimal` column bound).

use std::cmp::Ordering;

use crate::numeric::is_integral;

/// A runtime value. `Decimal` is represented as a scaled integer
/// (`mantissa`, `scale`) so equality and ordering are exact rather than
/// float-approximate: the decimal value is `mantissa / 10^scale`.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Decimal { mantissa: i128, scale: u8 },
    Text(String),
    Blob(Vec<u8>),
    /// Canonical lower-case hyphenated form, e.g.
    /// `"550e8400-e29b-41d4-a716-446655440000"`.
    Guid(String),
    Vector(Vec<f32>),
}

/// Rank used to order values of different variants when they aren't both
/// numeric. Numeric variants (`Boolean`, `Integer`, `Float`, `Decimal`)
/// share a single rank and instead compare by numeric value, mirroring how
/// a type-aware comparator treats integer widths as mutually comparable.
fn family_rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Boolean(_) | Value::Integer(_) | Value::Float(_) | Value::Decimal { .. } => 1,
        Value::Text(_) => 2,
        Value::Blob(_) => 3,
        Value::Guid(_) => 4,
        Value::Vector(_) => 5,
    }
}

/// Decimal-as-rational compare: `a.mantissa / 10^a.scale` vs
/// `b.mantissa / 10^b.scale`, done via cross-multiplication to stay exact.
fn compare_decimals(a_mantissa: i128, a_scale: u8, b_mantissa: i128, b_scale: u8) -> Ordering {
    if a_scale == b_scale {
        return a_mantissa.cmp(&b_mantissa);
    }
    let (a_scale, b_scale) = (a_scale as u32, b_scale as u32);
    if a_scale < b_scale {
        let scaled_a = a_mantissa.saturating_mul(10i128.saturating_pow(b_scale - a_scale));
        scaled_a.cmp(&b_mantissa)
    } else {
        let scaled_b = b_mantissa.saturating_mul(10i128.saturating_pow(a_scale - b_scale));
        a_mantissa.cmp(&scaled_b)
    }
}

fn as_decimal(v: &Value) -> Option<(i128, u8)> {
    match *v {
        Value::Boolean(b) => Some((b as i128, 0)),
        Value::Integer(n) => Some((n as i128, 0)),
        Value::Decimal { mantissa, scale } => Some((mantissa, scale)),
        Value::Float(f) => is_integral(f).map(|n| (n as i128, 0)),
        _ => None,
    }
}

/// Numeric compare across `Boolean`/`Integer`/`Float`/`Decimal`. Falls back
/// to float comparison (via `total_cmp`, which gives a total order over
/// `f64` including NaN) when either side is a non-integral float, since an
/// exact decimal representation isn't always available for it.
fn compare_numeric(a: &Value, b: &Value) -> Ordering {
    if let (Some((am, ascale)), Some((bm, bscale))) = (as_decimal(a), as_decimal(b)) {
        return compare_decimals(am, ascale, bm, bscale);
    }
    let as_f64 = |v: &Value| -> f64 {
        match *v {
            Value::Boolean(b) => b as i64 as f64,
            Value::Integer(n) => n as f64,
            Value::Float(f) => f,
            Value::Decimal { mantissa, scale } => {
                mantissa as f64 / 10f64.powi(scale as i32)
            },
            _ => unreachable!("non-numeric value passed to compare_numeric"),
        }
    };
    as_f64(a).total_cmp(&as_f64(b))
}

impl Value {
    /// Three-way compare returning an `Ordering`, compatible across integer
    /// widths and between `Integer`/`Float`/`Decimal`/`Boolean`.
    pub fn compare(&self, other: &Value) -> Ordering {
        if family_rank(self) == 1 && family_rank(other) == 1 {
            return compare_numeric(self, other);
        }
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Blob(a), Value::Blob(b)) => a.cmp(b),
            (Value::Guid(a), Value::Guid(b)) => a.cmp(b),
            (Value::Vector(a), Value::Vector(b)) => compare_vectors(a, b),
            _ => family_rank(self).cmp(&family_rank(other)),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

fn compare_vectors(a: &[f32], b: &[f32]) -> Ordering {
    match a.len().cmp(&b.len()) {
        Ordering::Equal => {},
        other => return other,
    }
    for (x, y) in a.iter().zip(b.iter()) {
        match x.total_cmp(y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}
