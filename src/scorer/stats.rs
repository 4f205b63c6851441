use crate::error::{UcResult, UmaCalcError};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

/// A raw stat magnitude. Always non-negative: malformed input is clamped to
/// zero on the way in, so the scoring functions never see a bad value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct StatValue(u32);

impl StatValue {
    pub const ZERO: StatValue = StatValue(0);

    pub const fn new(v: u32) -> Self {
        Self(v)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    pub fn from_i64(v: i64) -> Self {
        Self(v.clamp(0, u32::MAX as i64) as u32)
    }

    /// NaN, infinities and negatives become zero; fractions are floored.
    pub fn from_f64(v: f64) -> Self {
        if !v.is_finite() || v < 0.0 {
            return Self::ZERO;
        }
        Self(v.floor().min(u32::MAX as f64) as u32)
    }

    /// Text input as typed into a form field. Reads the leading integer the
    /// way a lenient number field does ("12abc" -> 12, "7.9" -> 7) and falls
    /// back to zero for anything else.
    pub fn from_input(s: &str) -> Self {
        let s = s.trim();
        let (negative, rest) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let digits_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
        if digits_len == 0 || negative {
            return Self::ZERO;
        }
        let magnitude = rest[..digits_len].parse::<u64>().unwrap_or(u64::MAX);
        Self(magnitude.min(u32::MAX as u64) as u32)
    }
}

impl From<u32> for StatValue {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for StatValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawStat {
            Int(i64),
            Float(f64),
            Text(String),
            Null(()),
        }

        Ok(match RawStat::deserialize(deserializer)? {
            RawStat::Int(v) => StatValue::from_i64(v),
            RawStat::Float(v) => StatValue::from_f64(v),
            RawStat::Text(s) => StatValue::from_input(&s),
            RawStat::Null(()) => StatValue::ZERO,
        })
    }
}

/// Block-wise stat scoring curve.
///
/// Stat space is cut into blocks of `block_size` points. Completed blocks
/// contribute `multiplier[i] * block_size`; the block in progress contributes
/// `multiplier[blocks] * (remainder + 1)`. Past the end of the table the last
/// multiplier is reused. The `+ 1` means a stat of zero still earns
/// `floor(multiplier[0])`.
#[derive(Debug, Clone)]
pub struct StatCurve {
    block_size: u32,
    multipliers: Vec<f64>,
    // prefix[i] = contribution of the first i completed blocks
    prefix: Vec<f64>,
}

impl StatCurve {
    pub fn new(block_size: u32, multipliers: Vec<f64>) -> UcResult<Self> {
        if block_size == 0 {
            return Err(UmaCalcError::Config(
                "stat_block_size must be greater than zero".to_string(),
            ));
        }
        if multipliers.is_empty() {
            return Err(UmaCalcError::Config(
                "stat_multipliers must not be empty".to_string(),
            ));
        }
        if let Some(bad) = multipliers.iter().find(|m| !m.is_finite() || **m < 0.0) {
            return Err(UmaCalcError::Config(format!(
                "stat multiplier {} must be finite and non-negative",
                bad
            )));
        }

        let block = block_size as f64;
        let mut prefix = Vec::with_capacity(multipliers.len() + 1);
        let mut acc = 0.0;
        prefix.push(acc);
        for m in &multipliers {
            acc += m * block;
            prefix.push(acc);
        }

        Ok(Self {
            block_size,
            multipliers,
            prefix,
        })
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    pub fn multipliers(&self) -> &[f64] {
        &self.multipliers
    }

    fn multiplier_at(&self, block: usize) -> f64 {
        let last = self.multipliers.len() - 1;
        self.multipliers[block.min(last)]
    }

    pub fn score(&self, stat: StatValue) -> i64 {
        let value = stat.get();
        let blocks = (value / self.block_size) as usize;
        let remainder = value % self.block_size;

        let table_len = self.multipliers.len();
        let full_blocks = if blocks <= table_len {
            self.prefix[blocks]
        } else {
            let extra = (blocks - table_len) as f64;
            self.prefix[table_len] + self.multiplier_at(table_len) * self.block_size as f64 * extra
        };

        let partial = self.multiplier_at(blocks) * (remainder as f64 + 1.0);
        (full_blocks + partial).floor() as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumString)]
pub enum LetterRank {
    #[strum(to_string = "G")]
    G,
    #[strum(to_string = "G⁺")]
    GPlus,
    #[strum(to_string = "F")]
    F,
    #[strum(to_string = "F⁺")]
    FPlus,
    #[strum(to_string = "E")]
    E,
    #[strum(to_string = "E⁺")]
    EPlus,
    #[strum(to_string = "D")]
    D,
    #[strum(to_string = "D⁺")]
    DPlus,
    #[strum(to_string = "C")]
    C,
    #[strum(to_string = "C⁺")]
    CPlus,
    #[strum(to_string = "B")]
    B,
    #[strum(to_string = "B⁺")]
    BPlus,
    #[strum(to_string = "A")]
    A,
    #[strum(to_string = "A⁺")]
    APlus,
    #[strum(to_string = "S")]
    S,
    #[strum(to_string = "S⁺")]
    SPlus,
    #[strum(to_string = "SS")]
    SS,
    #[strum(to_string = "SS⁺")]
    SSPlus,
}

// Lower bound of each letter rank, highest first.
const LETTER_BREAKPOINTS: [(u32, LetterRank); 18] = [
    (1150, LetterRank::SSPlus),
    (1100, LetterRank::SS),
    (1050, LetterRank::SPlus),
    (1000, LetterRank::S),
    (900, LetterRank::APlus),
    (800, LetterRank::A),
    (700, LetterRank::BPlus),
    (600, LetterRank::B),
    (500, LetterRank::CPlus),
    (400, LetterRank::C),
    (350, LetterRank::DPlus),
    (300, LetterRank::D),
    (250, LetterRank::EPlus),
    (200, LetterRank::E),
    (150, LetterRank::FPlus),
    (100, LetterRank::F),
    (51, LetterRank::GPlus),
    (1, LetterRank::G),
];

pub const LETTER_RANK_MAX: u32 = 1200;
pub const ULTRA_RANK_MAX: u32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumString)]
pub enum UltraTier {
    UG,
    UF,
    UE,
    UD,
    UC,
    UB,
    UA,
    US,
}

impl UltraTier {
    const ALL: [UltraTier; 8] = [
        UltraTier::UG,
        UltraTier::UF,
        UltraTier::UE,
        UltraTier::UD,
        UltraTier::UC,
        UltraTier::UB,
        UltraTier::UA,
        UltraTier::US,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatRank {
    Letter(LetterRank),
    Ultra { tier: UltraTier, step: u8 },
}

impl fmt::Display for StatRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatRank::Letter(rank) => write!(f, "{}", rank),
            StatRank::Ultra { tier, step } => write!(f, "{}{}", tier, step),
        }
    }
}

impl Serialize for StatRank {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Letter rank for a stat.
///
/// 1..=1200 maps onto G through SS⁺. 1201..=2000 maps onto eight 100-point
/// tiers (UG..US), each split into nine steps of ten points where the final
/// position of a band folds into step 9. Zero and anything past 2000 read
/// as plain G.
pub fn rate(stat: StatValue) -> StatRank {
    let value = stat.get();

    if (LETTER_RANK_MAX + 1..=ULTRA_RANK_MAX).contains(&value) {
        let offset = value - (LETTER_RANK_MAX + 1);
        let tier = UltraTier::ALL[(offset / 100) as usize];
        let position = match value % 100 {
            0 => 100,
            p => p,
        };
        let step = position.div_ceil(10).min(9) as u8;
        return StatRank::Ultra { tier, step };
    }

    if (1..=LETTER_RANK_MAX).contains(&value) {
        for (floor, rank) in LETTER_BREAKPOINTS {
            if value >= floor {
                return StatRank::Letter(rank);
            }
        }
    }

    StatRank::Letter(LetterRank::G)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_curve() -> StatCurve {
        let m = crate::config::StatTables::default().get_multipliers().unwrap();
        StatCurve::new(50, m).unwrap()
    }

    #[test]
    fn test_zero_still_scores_first_multiplier() {
        let curve = StatCurve::new(50, vec![1.5, 2.0]).unwrap();
        assert_eq!(curve.score(StatValue::ZERO), 1);
        assert_eq!(default_curve().score(StatValue::ZERO), 0);
    }

    #[test]
    fn test_block_boundary() {
        let curve = default_curve();
        // 0.5 * 50 + 0.8 * 1
        assert_eq!(curve.score(StatValue::new(50)), 25);
        // 0.5 * 50 + 0.8 * 50
        assert_eq!(curve.score(StatValue::new(99)), 65);
    }

    #[test]
    fn test_extrapolates_last_multiplier() {
        let curve = StatCurve::new(10, vec![1.0, 2.0]).unwrap();
        // blocks: 10*1 + 10*2 + 10*2, partial 2 * (5 + 1)
        assert_eq!(curve.score(StatValue::new(35)), 62);
        assert!(curve.score(StatValue::new(40)) > curve.score(StatValue::new(39)));
    }

    #[test]
    fn test_curve_rejects_bad_tables() {
        assert!(StatCurve::new(0, vec![1.0]).is_err());
        assert!(StatCurve::new(50, vec![]).is_err());
        assert!(StatCurve::new(50, vec![1.0, f64::NAN]).is_err());
        assert!(StatCurve::new(50, vec![-1.0]).is_err());
    }

    #[test]
    fn test_from_input_is_lenient() {
        assert_eq!(StatValue::from_input("1200"), StatValue::new(1200));
        assert_eq!(StatValue::from_input("  87 "), StatValue::new(87));
        assert_eq!(StatValue::from_input("12abc"), StatValue::new(12));
        assert_eq!(StatValue::from_input("7.9"), StatValue::new(7));
        assert_eq!(StatValue::from_input("-40"), StatValue::ZERO);
        assert_eq!(StatValue::from_input("abc"), StatValue::ZERO);
        assert_eq!(StatValue::from_input(""), StatValue::ZERO);
    }

    #[test]
    fn test_from_f64_clamps() {
        assert_eq!(StatValue::from_f64(f64::NAN), StatValue::ZERO);
        assert_eq!(StatValue::from_f64(-3.0), StatValue::ZERO);
        assert_eq!(StatValue::from_f64(f64::INFINITY), StatValue::ZERO);
        assert_eq!(StatValue::from_f64(310.8), StatValue::new(310));
    }

    #[test]
    fn test_deserialize_mixed_json() {
        let v: Vec<StatValue> = serde_json::from_str(r#"[800, "650", -5, 12.5, "x", null]"#).unwrap();
        assert_eq!(
            v,
            vec![
                StatValue::new(800),
                StatValue::new(650),
                StatValue::ZERO,
                StatValue::new(12),
                StatValue::ZERO,
                StatValue::ZERO
            ]
        );
    }

    #[test]
    fn test_ultra_band_edges() {
        assert_eq!(rate(StatValue::new(1201)).to_string(), "UG1");
        assert_eq!(rate(StatValue::new(1210)).to_string(), "UG1");
        assert_eq!(rate(StatValue::new(1211)).to_string(), "UG2");
        assert_eq!(rate(StatValue::new(1290)).to_string(), "UG9");
        assert_eq!(rate(StatValue::new(1300)).to_string(), "UG9");
        assert_eq!(rate(StatValue::new(1301)).to_string(), "UF1");
        assert_eq!(rate(StatValue::new(2000)).to_string(), "US9");
    }

    #[test]
    fn test_out_of_range_reads_g() {
        assert_eq!(rate(StatValue::ZERO), StatRank::Letter(LetterRank::G));
        assert_eq!(rate(StatValue::new(2001)), StatRank::Letter(LetterRank::G));
    }
}
