use chrono::{DateTime, TimeZone, Utc};

pub fn mean(data: &[f64]) -> Option<f64> {
    let sum = data.iter().sum::<f64>();
    let count = data.len();

    match count {
        positive if positive > 0 => Some(sum / count as f64),
        _ => None,
    }
}

/// Mean of the epoch values, truncated to the millisecond.
pub fn mean_timestamp(data: &[DateTime<Utc>]) -> Option<DateTime<Utc>> {
    if data.is_empty() {
        return None;
    }

    let sum = data
        .iter()
        .map(|t| t.timestamp_millis() as i128)
        .sum::<i128>();
    let millis = sum.div_euclid(data.len() as i128);

    Utc.timestamp_millis_opt(i64::try_from(millis).ok()?).single()
}
