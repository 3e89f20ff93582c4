//! The stored shape of a job result

use crate::error::JobError;
use crate::job::FinalResult;
use serde::{Deserialize, Serialize};

/// One row of the result table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub total_samples: i64,
    pub points_in_circle: i64,
    pub pi_estimate: f64,
}

impl TryFrom<&FinalResult> for ResultRecord {
    type Error = JobError;

    fn try_from(result: &FinalResult) -> Result<Self, Self::Error> {
        let total_samples = i64::try_from(result.total_samples).map_err(|_| {
            JobError::invalid_argument(format!(
                "total_samples {} does not fit an int64 column",
                result.total_samples
            ))
        })?;
        let points_in_circle = i64::try_from(result.points_matched).map_err(|_| {
            JobError::invalid_argument(format!(
                "points_matched {} does not fit an int64 column",
                result.points_matched
            ))
        })?;

        Ok(Self {
            total_samples,
            points_in_circle,
            pi_estimate: result.estimate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_final_result() {
        let result = FinalResult {
            total_samples: 8,
            points_matched: 6,
            estimate: 3.0,
        };
        let record = ResultRecord::try_from(&result).unwrap();
        assert_eq!(record.total_samples, 8);
        assert_eq!(record.points_in_circle, 6);
        assert_eq!(record.pi_estimate, 3.0);
    }

    #[test]
    fn test_rejects_values_beyond_int64() {
        let result = FinalResult {
            total_samples: u64::MAX,
            points_matched: 0,
            estimate: 0.0,
        };
        assert!(matches!(
            ResultRecord::try_from(&result),
            Err(JobError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_json_field_names() {
        let record = ResultRecord {
            total_samples: 1,
            points_in_circle: 1,
            pi_estimate: 4.0,
        };
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["points_in_circle"], 1);
        assert_eq!(json["pi_estimate"], 4.0);
    }
}
