//! Elevation matrices and longitudinal profiles.
//!
//! A matrix file holds one row of ground elevations per line, separated by
//! commas and/or whitespace. A profile is one row or column of it.

use std::fmt;

pub type ProfileResult<T> = Result<T, ProfileError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    #[error("Elevation matrix is empty")]
    Empty,

    #[error("Row {row}: '{token}' is not a number")]
    NonNumeric { row: usize, token: String },

    #[error("Row {row}: expected {expected} values, found {found}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{axis} index {index} out of range (matrix has {len})")]
    OutOfRange {
        axis: ProfileAxis,
        index: usize,
        len: usize,
    },
}

/// Which direction of the matrix a profile runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileAxis {
    Row,
    Column,
}

impl fmt::Display for ProfileAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileAxis::Row => f.write_str("Row"),
            ProfileAxis::Column => f.write_str("Column"),
        }
    }
}

/// Rectangular grid of elevations in metres.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationMatrix {
    rows: Vec<Vec<f64>>,
}

impl ElevationMatrix {
    /// Parse matrix text. Blank lines are skipped; error rows are 1-based
    /// line numbers of the input.
    pub fn parse(text: &str) -> ProfileResult<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut rows: Vec<Vec<f64>> = Vec::new();

        for (line_idx, line) in text.lines().enumerate() {
            let row_no = line_idx + 1;
            let tokens: Vec<&str> = line
                .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
                .filter(|t| !t.is_empty())
                .collect();
            if tokens.is_empty() {
                continue;
            }

            let mut values = Vec::with_capacity(tokens.len());
            for token in tokens {
                let v: f64 = token.parse().map_err(|_| ProfileError::NonNumeric {
                    row: row_no,
                    token: token.to_string(),
                })?;
                if !v.is_finite() {
                    return Err(ProfileError::NonNumeric {
                        row: row_no,
                        token: token.to_string(),
                    });
                }
                values.push(v);
            }

            if let Some(first) = rows.first() {
                if first.len() != values.len() {
                    return Err(ProfileError::Ragged {
                        row: row_no,
                        expected: first.len(),
                        found: values.len(),
                    });
                }
            }
            rows.push(values);
        }

        if rows.is_empty() {
            return Err(ProfileError::Empty);
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn cols(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Row `index` (0-based) as a profile.
    pub fn row(&self, index: usize) -> ProfileResult<ElevationProfile> {
        self.rows
            .get(index)
            .map(|r| ElevationProfile::new(r.clone()))
            .ok_or(ProfileError::OutOfRange {
                axis: ProfileAxis::Row,
                index,
                len: self.rows(),
            })
    }

    /// Column `index` (0-based) as a profile.
    pub fn column(&self, index: usize) -> ProfileResult<ElevationProfile> {
        if index >= self.cols() {
            return Err(ProfileError::OutOfRange {
                axis: ProfileAxis::Column,
                index,
                len: self.cols(),
            });
        }
        Ok(ElevationProfile::new(
            self.rows.iter().map(|r| r[index]).collect(),
        ))
    }

    pub fn profile(&self, axis: ProfileAxis, index: usize) -> ProfileResult<ElevationProfile> {
        match axis {
            ProfileAxis::Row => self.row(index),
            ProfileAxis::Column => self.column(index),
        }
    }
}

/// Ordered station elevations along a pipeline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElevationProfile {
    pub elevations_m: Vec<f64>,
}

impl ElevationProfile {
    pub fn new(elevations_m: Vec<f64>) -> Self {
        Self { elevations_m }
    }

    pub fn len(&self) -> usize {
        self.elevations_m.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elevations_m.is_empty()
    }

    /// Last minus first station; zero with fewer than two stations.
    pub fn net_change(&self) -> f64 {
        match (self.elevations_m.first(), self.elevations_m.last()) {
            (Some(first), Some(last)) if self.elevations_m.len() >= 2 => last - first,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_separators() {
        let m = ElevationMatrix::parse("1, 2, 3\n4\t5  6\n\n7,8,9\n").unwrap();
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 3);
        assert_eq!(m.row(1).unwrap().elevations_m, vec![4.0, 5.0, 6.0]);
        assert_eq!(m.column(2).unwrap().elevations_m, vec![3.0, 6.0, 9.0]);
    }

    #[test]
    fn strips_byte_order_mark() {
        let m = ElevationMatrix::parse("\u{feff}10.5,11\n").unwrap();
        assert_eq!(m.row(0).unwrap().elevations_m, vec![10.5, 11.0]);
    }

    #[test]
    fn empty_input_is_error() {
        assert_eq!(ElevationMatrix::parse(""), Err(ProfileError::Empty));
        assert_eq!(ElevationMatrix::parse("\n  \n"), Err(ProfileError::Empty));
    }

    #[test]
    fn non_numeric_names_row() {
        let err = ElevationMatrix::parse("1,2\n3,abc\n").unwrap_err();
        assert_eq!(
            err,
            ProfileError::NonNumeric {
                row: 2,
                token: "abc".to_string()
            }
        );
    }

    #[test]
    fn ragged_row_rejected() {
        let err = ElevationMatrix::parse("1,2,3\n4,5\n").unwrap_err();
        assert_eq!(
            err,
            ProfileError::Ragged {
                row: 2,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn out_of_range_selection() {
        let m = ElevationMatrix::parse("1,2\n3,4\n").unwrap();
        assert!(matches!(
            m.row(2),
            Err(ProfileError::OutOfRange {
                axis: ProfileAxis::Row,
                index: 2,
                len: 2
            })
        ));
        assert!(m.profile(ProfileAxis::Column, 5).is_err());
    }

    #[test]
    fn net_change_last_minus_first() {
        assert_eq!(ElevationProfile::new(vec![100.0, 98.0, 95.5]).net_change(), -4.5);
        assert_eq!(ElevationProfile::new(vec![42.0]).net_change(), 0.0);
        assert_eq!(ElevationProfile::default().net_change(), 0.0);
    }
}
