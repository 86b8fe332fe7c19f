//! Password guess collection and the copyable profile report.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::quiz::AbAnswers;
use crate::SiteError;

const RULE: &str = "================";

/// The guesses a visitor submitted, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessBook {
    slots: usize,
    guesses: Vec<String>,
}

impl GuessBook {
    pub fn new(slots: usize) -> Self {
        Self {
            slots,
            guesses: Vec::new(),
        }
    }

    pub fn slots(&self) -> usize {
        self.slots
    }

    pub fn guesses(&self) -> &[String] {
        &self.guesses
    }

    /// Reads at most `slots` inputs, trims them and drops the blank ones.
    pub fn collect<I, T>(&mut self, inputs: I) -> &[String]
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.guesses = inputs
            .into_iter()
            .take(self.slots)
            .map(|input| input.as_ref().trim().to_string())
            .filter(|guess| !guess.is_empty())
            .collect();
        &self.guesses
    }
}

/// Validates the two passphrase fields of the fake wallet prompt.
pub fn confirm_passphrase<'a>(first: &'a str, second: &str) -> Result<&'a str, SiteError> {
    if first.is_empty() {
        return Err(SiteError::EmptyPassphrase);
    }
    if first != second {
        return Err(SiteError::PassphraseMismatch);
    }
    Ok(first)
}

/// Copies an accepted passphrase into the first guess input when it is still empty.
pub fn prefill_first_slot(slots: &mut [String], passphrase: &str) -> bool {
    match slots.first_mut() {
        Some(first) if first.is_empty() => {
            *first = passphrase.to_string();
            true
        }
        _ => false,
    }
}

/// Plain-text summary of quiz answers and guesses.
pub fn render_profile(answers: &AbAnswers, guesses: &[String], generated_at: DateTime<Utc>) -> String {
    let mut profile = format!("PASSWORD PROFILE\n{RULE}\n\nA/B Test Results:\n");
    for (question, answer) in answers {
        profile.push_str(&format!("  Q{question}: {answer}\n"));
    }

    profile.push_str("\nPassword Guesses:\n");
    for (index, guess) in guesses.iter().enumerate() {
        profile.push_str(&format!("  {}. {guess}\n", index + 1));
    }

    profile.push_str(&format!(
        "\n{RULE}\nGenerated: {}",
        generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    ));
    profile
}
