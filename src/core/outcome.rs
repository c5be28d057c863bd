//! Result of dispatching a message

/// What the caller must do after a dispatch.
///
/// Dispatch never exits the process itself. A FATAL message or a failing
/// writer yields [`Outcome::Terminate`], and the embedding application decides
/// where to act on it, usually by calling [`Outcome::enforce`].
#[must_use = "a Terminate outcome must be enforced or handled"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Terminate { code: i32 },
}

impl Outcome {
    pub fn is_terminate(&self) -> bool {
        matches!(self, Outcome::Terminate { .. })
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Outcome::Continue => None,
            Outcome::Terminate { code } => Some(*code),
        }
    }

    /// Exit the process with the carried status on `Terminate`, return otherwise
    pub fn enforce(self) {
        if let Outcome::Terminate { code } = self {
            std::process::exit(code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        assert!(!Outcome::Continue.is_terminate());
        assert_eq!(Outcome::Continue.exit_code(), None);

        let outcome = Outcome::Terminate { code: 7 };
        assert!(outcome.is_terminate());
        assert_eq!(outcome.exit_code(), Some(7));
    }

    #[test]
    fn test_enforce_continue_returns() {
        Outcome::Continue.enforce();
    }
}
