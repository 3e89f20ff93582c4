//! Text rendered on stdout

use crate::job::FinalResult;
use crate::sink::ResultRecord;

const RULE: &str = "-----------------------------------------";

/// Format an integer with `,` between groups of three digits
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Lines printed before the job starts
pub fn banner(samples: u64, destination: &str) -> String {
    format!(
        "Starting Monte Carlo Pi estimation with {} samples.\nOutput will be written to: {}",
        group_thousands(samples),
        destination
    )
}

/// The result block printed after the reduce phase
pub fn summary(result: &FinalResult) -> String {
    format!(
        "{RULE}\nPoints in circle: {}\nTotal points:     {}\nPi is roughly:    {:?}\n{RULE}",
        group_thousands(result.points_matched),
        group_thousands(result.total_samples),
        result.estimate
    )
}

/// One line per stored row
pub fn record_table(records: &[ResultRecord]) -> String {
    let mut out = format!(
        "{:>20}  {:>20}  {:>20}",
        "total_samples", "points_in_circle", "pi_estimate"
    );
    for record in records {
        out.push_str(&format!(
            "\n{:>20}  {:>20}  {:>20}",
            record.total_samples, record.points_in_circle, record.pi_estimate
        ));
    }
    out
}
