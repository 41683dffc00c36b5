//! Yes/no confirmation, pluggable so scaffolding runs without a terminal.

use crate::error::Result;
use inquire::Confirm;

pub trait Confirmer {
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmPolicy {
    /// Answer yes to everything (`-y`).
    AutoAccept,
    AutoReject,
    /// Ask on the terminal.
    Interactive,
}

impl Confirmer for ConfirmPolicy {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        match self {
            ConfirmPolicy::AutoAccept => {
                tracing::debug!("auto-accepted: {}", question);
                Ok(true)
            }
            ConfirmPolicy::AutoReject => {
                tracing::debug!("auto-rejected: {}", question);
                Ok(false)
            }
            ConfirmPolicy::Interactive => {
                Ok(Confirm::new(question).with_default(false).prompt()?)
            }
        }
    }
}

/// Answers from a fixed script, then `fallback`. Records every question asked.
#[derive(Debug, Default)]
pub struct ScriptedConfirmer {
    answers: std::collections::VecDeque<bool>,
    fallback: bool,
    pub asked: Vec<String>,
}

impl ScriptedConfirmer {
    pub fn new(answers: &[bool], fallback: bool) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            fallback,
            asked: Vec::new(),
        }
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        self.asked.push(question.to_string());
        Ok(self.answers.pop_front().unwrap_or(self.fallback))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_policies() {
        assert!(ConfirmPolicy::AutoAccept.confirm("Create?").unwrap());
        assert!(!ConfirmPolicy::AutoReject.confirm("Create?").unwrap());
    }

    #[test]
    fn test_scripted_then_fallback() {
        let mut c = ScriptedConfirmer::new(&[false, true], false);
        assert!(!c.confirm("a").unwrap());
        assert!(c.confirm("b").unwrap());
        assert!(!c.confirm("c").unwrap());
        assert_eq!(c.asked, vec!["a", "b", "c"]);
    }
}
