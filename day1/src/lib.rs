use itertools::Itertools;
use thiserror::Error;
use tracing::debug;
use util::{parse_line, parse_number, BadInput};

/// `input.txt` at the root of this crate, one level above `src/`.
pub const INPUT_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/input.txt");

#[derive(Error, Debug)]
pub enum CalorieError {
    #[error(transparent)]
    Parse(#[from] BadInput),

    #[error("calorie total of group {group} overflows")]
    Overflow { group: usize },

    #[error("sum of the top {n} calorie totals overflows")]
    TopOverflow { n: usize },
}

/// One total per blank-line separated group, in input order.
///
/// A blank line closes the current group even if it is empty, so consecutive
/// blank lines yield groups totalling 0. A blank line at the very end of the
/// input does not open a new group.
pub fn group_totals(
    input: impl Iterator<Item = impl Into<String>>,
) -> Result<Vec<i64>, CalorieError> {
    let mut totals = Vec::new();
    let mut current_total: Option<i64> = None;

    for (i, line) in input.enumerate() {
        let line: String = line.into();
        let line = line.trim();

        if line.is_empty() {
            totals.push(current_total.take().unwrap_or(0));
            continue;
        }

        let calories = parse_line(line, i + 1, parse_number)?;
        let total = current_total
            .unwrap_or(0)
            .checked_add(calories)
            .ok_or(CalorieError::Overflow {
                group: totals.len() + 1,
            })?;
        current_total = Some(total);
    }

    if let Some(total) = current_total {
        totals.push(total);
    }

    debug!(groups = totals.len(), "summed calorie groups");

    Ok(totals)
}

/// Sum of the `n` biggest group totals, or of all of them when there are fewer.
pub fn top_n_total(
    input: impl Iterator<Item = impl Into<String>>,
    n: usize,
) -> Result<i64, CalorieError> {
    group_totals(input)?
        .into_iter()
        .sorted_unstable_by(|a, b| b.cmp(a))
        .take(n)
        .try_fold(0i64, |acc, total| acc.checked_add(total))
        .ok_or(CalorieError::TopOverflow { n })
}

pub fn max_total(input: impl Iterator<Item = impl Into<String>>) -> Result<i64, CalorieError> {
    top_n_total(input, 1)
}

pub fn top_three_total(
    input: impl Iterator<Item = impl Into<String>>,
) -> Result<i64, CalorieError> {
    top_n_total(input, 3)
}
