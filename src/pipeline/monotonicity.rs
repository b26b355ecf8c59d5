//! Monotonicity constraints for IV binning
//!
//! Defines the WoE trend that every accepted split must follow.

use serde::Serialize;

use super::error::BinningError;

/// Monotonicity constraint for the WoE trend across accepted splits
///
/// A split's trend is `+1` when the lower side has the larger WoE
/// (WoE = ln(%zeros / %ones)), i.e. the share of ones rises with the
/// predictor, and `-1` otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Monotonicity {
    /// No constraint - any split direction is accepted
    #[default]
    None,
    /// Event rate must increase with the predictor (trend `+1`)
    Increasing,
    /// Event rate must decrease with the predictor (trend `-1`)
    Decreasing,
}

impl Monotonicity {
    /// Integer code of the constraint: 0, 1 or -1
    pub fn sign(self) -> i32 {
        match self {
            Monotonicity::None => 0,
            Monotonicity::Increasing => 1,
            Monotonicity::Decreasing => -1,
        }
    }

    /// Whether a split with the given trend sign satisfies the constraint
    pub fn admits(self, trend: i32) -> bool {
        match self {
            Monotonicity::None => true,
            constrained => constrained.sign() == trend,
        }
    }
}

impl TryFrom<i32> for Monotonicity {
    type Error = BinningError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Monotonicity::None),
            1 => Ok(Monotonicity::Increasing),
            -1 => Ok(Monotonicity::Decreasing),
            _ => Err(BinningError::InvalidMonotonicity { code }),
        }
    }
}

impl std::fmt::Display for Monotonicity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Monotonicity::None => write!(f, "none"),
            Monotonicity::Increasing => write!(f, "increasing"),
            Monotonicity::Decreasing => write!(f, "decreasing"),
        }
    }
}

impl std::str::FromStr for Monotonicity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "0" => Ok(Monotonicity::None),
            "increasing" | "inc" | "1" => Ok(Monotonicity::Increasing),
            "decreasing" | "dec" | "-1" => Ok(Monotonicity::Decreasing),
            _ => Err(format!(
                "Unknown monotonicity constraint: '{}'. Use 'none', 'increasing' or 'decreasing'.",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonicity_from_str() {
        assert_eq!("none".parse::<Monotonicity>().unwrap(), Monotonicity::None);
        assert_eq!(
            "increasing".parse::<Monotonicity>().unwrap(),
            Monotonicity::Increasing
        );
        assert_eq!("INC".parse::<Monotonicity>().unwrap(), Monotonicity::Increasing);
        assert_eq!(
            "decreasing".parse::<Monotonicity>().unwrap(),
            Monotonicity::Decreasing
        );
        assert_eq!("-1".parse::<Monotonicity>().unwrap(), Monotonicity::Decreasing);
        assert!("peak".parse::<Monotonicity>().is_err());
    }

    #[test]
    fn test_monotonicity_display() {
        assert_eq!(Monotonicity::None.to_string(), "none");
        assert_eq!(Monotonicity::Increasing.to_string(), "increasing");
        assert_eq!(Monotonicity::Decreasing.to_string(), "decreasing");
    }

    #[test]
    fn test_monotonicity_codes() {
        for code in [-1, 0, 1] {
            assert_eq!(Monotonicity::try_from(code).unwrap().sign(), code);
        }
        assert_eq!(
            Monotonicity::try_from(2),
            Err(BinningError::InvalidMonotonicity { code: 2 })
        );
    }

    #[test]
    fn test_admits() {
        assert!(Monotonicity::None.admits(1));
        assert!(Monotonicity::None.admits(-1));
        assert!(Monotonicity::Increasing.admits(1));
        assert!(!Monotonicity::Increasing.admits(-1));
        assert!(Monotonicity::Decreasing.admits(-1));
        assert!(!Monotonicity::Decreasing.admits(1));
    }
}
