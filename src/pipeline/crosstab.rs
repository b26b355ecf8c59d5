//! Crosstabulation of a predictor against a binary outcome
//!
//! Groups observation pairs by exact predictor value and tallies the
//! outcome classes per distinct value, sorted ascending.

use serde::Serialize;

use super::error::BinningError;

/// Tolerance for floating point comparison when checking binary 0/1 values
const TOLERANCE: f64 = 1e-9;

/// Class tallies of a set of observations
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ClassTotals {
    /// Count of observations with outcome 0
    pub zeros: f64,
    /// Count of observations with outcome 1
    pub ones: f64,
}

impl ClassTotals {
    pub fn new(zeros: f64, ones: f64) -> Self {
        Self { zeros, ones }
    }

    /// Total population (zeros + ones)
    pub fn population(&self) -> f64 {
        self.zeros + self.ones
    }

    /// Add one observation with the given binary outcome
    fn record(&mut self, outcome: Outcome) {
        outcome.tally(&mut self.zeros, &mut self.ones);
    }
}

impl std::ops::Add for ClassTotals {
    type Output = ClassTotals;

    fn add(self, rhs: ClassTotals) -> ClassTotals {
        ClassTotals::new(self.zeros + rhs.zeros, self.ones + rhs.ones)
    }
}

impl std::ops::AddAssign for ClassTotals {
    fn add_assign(&mut self, rhs: ClassTotals) {
        self.zeros += rhs.zeros;
        self.ones += rhs.ones;
    }
}

impl std::ops::Sub for ClassTotals {
    type Output = ClassTotals;

    fn sub(self, rhs: ClassTotals) -> ClassTotals {
        ClassTotals::new(self.zeros - rhs.zeros, self.ones - rhs.ones)
    }
}

#[derive(Debug, Clone, Copy)]
enum Outcome {
    Zero,
    One,
}

impl Outcome {
    fn tally(self, zeros: &mut f64, ones: &mut f64) {
        match self {
            Outcome::Zero => *zeros += 1.0,
            Outcome::One => *ones += 1.0,
        }
    }
}

/// Aggregate counts for one distinct predictor value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateRow {
    /// The distinct predictor value (later used as a breakpoint)
    pub value: f64,
    /// Count of observations with this value and outcome 0
    pub zero_count: f64,
    /// Count of observations with this value and outcome 1
    pub one_count: f64,
}

impl AggregateRow {
    pub fn totals(&self) -> ClassTotals {
        ClassTotals::new(self.zero_count, self.one_count)
    }

    fn record(&mut self, outcome: Outcome) {
        outcome.tally(&mut self.zero_count, &mut self.one_count);
    }
}

/// Per-distinct-value outcome counts, strictly ascending by value
#[derive(Debug, Clone)]
pub struct Crosstab {
    rows: Vec<AggregateRow>,
    missing: ClassTotals,
}

impl Crosstab {
    /// Build the crosstab from equal-length predictor and outcome slices.
    ///
    /// Observations whose predictor is NaN or infinite are kept out of the
    /// rows (and therefore out of the grand totals); their class tallies
    /// are available through [`Crosstab::missing`].
    pub fn build(x: &[f64], y: &[f64]) -> Result<Self, BinningError> {
        if x.len() != y.len() {
            return Err(BinningError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        if x.is_empty() {
            return Err(BinningError::EmptyInput);
        }

        let mut pairs: Vec<(f64, Outcome)> = Vec::with_capacity(x.len());
        let mut missing = ClassTotals::default();

        for (index, (&value, &target)) in x.iter().zip(y.iter()).enumerate() {
            let outcome = parse_outcome(target)
                .ok_or(BinningError::NonBinaryTarget { index, value: target })?;
            if value.is_finite() {
                pairs.push((value, outcome));
            } else {
                missing.record(outcome);
            }
        }

        if pairs.is_empty() {
            return Err(BinningError::NoFiniteValues);
        }

        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut rows: Vec<AggregateRow> = Vec::new();
        for (value, outcome) in pairs {
            // -0.0 and 0.0 compare equal and land in the same row
            if !rows.last().is_some_and(|last| last.value == value) {
                rows.push(AggregateRow {
                    value,
                    zero_count: 0.0,
                    one_count: 0.0,
                });
            }
            if let Some(row) = rows.last_mut() {
                row.record(outcome);
            }
        }

        Ok(Self { rows, missing })
    }

    /// Number of distinct finite predictor values
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[AggregateRow] {
        &self.rows
    }

    /// Row at `index`
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    pub fn row(&self, index: usize) -> &AggregateRow {
        &self.rows[index]
    }

    /// Class tallies of observations with a non-finite predictor
    pub fn missing(&self) -> ClassTotals {
        self.missing
    }

    /// Class totals over the inclusive row range `[start, stop]`
    ///
    /// # Panics
    /// Panics if `start > stop` or `stop >= self.len()`.
    pub fn totals(&self, start: usize, stop: usize) -> ClassTotals {
        self.rows[start..=stop]
            .iter()
            .fold(ClassTotals::default(), |acc, row| acc + row.totals())
    }

    /// Class totals over every row
    pub fn grand_totals(&self) -> ClassTotals {
        match self.rows.len() {
            0 => ClassTotals::default(),
            n => self.totals(0, n - 1),
        }
    }
}

fn parse_outcome(value: f64) -> Option<Outcome> {
    if (value - 0.0).abs() < TOLERANCE {
        Some(Outcome::Zero)
    } else if (value - 1.0).abs() < TOLERANCE {
        Some(Outcome::One)
    } else {
        None
    }
}
