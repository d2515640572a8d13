//! System prompt for the intake assistant.

use chrono::{DateTime, Utc};

const INTAKE_PERSONA: &str = "\
You are an accident-report intake assistant. Your job is to collect a \
complete picture of the incident: when and where it happened, the vehicles \
and people involved, injuries, damage, weather and road conditions, and any \
witnesses or police involvement. Ask one question at a time, keep questions \
short and plain, and acknowledge the user's answers before moving on. If \
the user mentions an uploaded file, thank them and continue with the next \
question. Do not give legal advice.";

/// Full system message, stamped with the current date.
pub fn intake_system_prompt(now: DateTime<Utc>) -> String {
    format!(
        "{}\n\nToday's date is {}.",
        INTAKE_PERSONA,
        now.format("%A, %B %d, %Y")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn prompt_carries_the_date() {
        let now = Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap();
        let prompt = intake_system_prompt(now);
        assert!(prompt.starts_with("You are an accident-report intake assistant."));
        assert!(prompt.ends_with("Today's date is Friday, March 14, 2025."));
    }
}
