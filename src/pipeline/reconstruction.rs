//! Secret reconstruction: pasted shares in, hex secret out

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use crate::primitive::{CombineError, Combiner, RecoveredSecret};

/// Raw reconstruction fields
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReconstructionInput {
    /// One mnemonic per line
    pub shares: String,
    pub passphrase: String,
}

impl fmt::Debug for ReconstructionInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReconstructionInput")
            .field("shares", &format_args!("{} lines", self.shares.lines().count()))
            .field("passphrase", &"<redacted>")
            .finish()
    }
}

/// Splits the share field into trimmed, non-empty lines
///
/// # Examples
///
/// ```rust
/// use slip39_tool::pipeline::reconstruction::normalize_shares;
///
/// let lines = normalize_shares("  first share \n\n\r\nsecond share\n");
/// assert_eq!(*lines, vec!["first share".to_string(), "second share".to_string()]);
/// ```
#[must_use]
pub fn normalize_shares(raw: &str) -> Zeroizing<Vec<String>> {
    Zeroizing::new(
        raw.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect(),
    )
}

/// Combines the pasted shares
///
/// An empty share field is not an error: it yields `Ok(None)`.
///
/// # Errors
/// Returns the [`CombineError`] raised by the combiner
pub fn recover<C: Combiner>(
    input: &ReconstructionInput,
    combiner: &C,
) -> Result<Option<RecoveredSecret>, CombineError> {
    if input.shares.is_empty() {
        return Ok(None);
    }
    let mnemonics = normalize_shares(&input.shares);
    debug!(mnemonics = mnemonics.len(), "combining shares");
    combiner.combine(&mnemonics, &input.passphrase).map(Some)
}

/// Output fields of the reconstruction form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconstructionView {
    /// Lowercase hex of the recovered secret
    pub secret: String,
    pub error: Option<String>,
}

/// Runs [`recover`] from a cleared view and renders the outcome
#[must_use]
pub fn run<C: Combiner>(input: &ReconstructionInput, combiner: &C) -> ReconstructionView {
    let mut view = ReconstructionView::default();
    match recover(input, combiner) {
        Ok(Some(secret)) => view.secret = secret.to_hex().as_str().to_owned(),
        Ok(None) => {}
        Err(e) => {
            debug!(error = %e, "reconstruction failed");
            view.error = Some(e.to_string());
        }
    }
    view
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// Records what it was asked to combine
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<(Vec<String>, String)>>,
    }

    impl Combiner for Recorder {
        fn combine(
            &self,
            mnemonics: &[String],
            passphrase: &str,
        ) -> Result<RecoveredSecret, CombineError> {
            self.calls
                .borrow_mut()
                .push((mnemonics.to_vec(), passphrase.to_string()));
            Err(CombineError::InvalidChecksum)
        }
    }

    #[test]
    fn test_empty_field_is_silent() {
        let recorder = Recorder::default();
        let view = run(&ReconstructionInput::default(), &recorder);
        assert_eq!(view, ReconstructionView::default());
        assert!(recorder.calls.borrow().is_empty());
    }

    #[test]
    fn test_lines_are_trimmed_before_combining() {
        let recorder = Recorder::default();
        let input = ReconstructionInput {
            shares: "\n  alpha beta \n\ngamma\n".to_string(),
            passphrase: "pw".to_string(),
        };
        let view = run(&input, &recorder);

        assert_eq!(view.error.as_deref(), Some("Invalid mnemonic checksum."));
        assert!(view.secret.is_empty());
        assert_eq!(
            recorder.calls.borrow()[0],
            (
                vec!["alpha beta".to_string(), "gamma".to_string()],
                "pw".to_string()
            )
        );
    }

    #[test]
    fn test_whitespace_only_field_reaches_combiner() {
        let recorder = Recorder::default();
        let input = ReconstructionInput {
            shares: " \n ".to_string(),
            passphrase: String::new(),
        };
        let _ = recover(&input, &recorder);
        assert_eq!(recorder.calls.borrow()[0].0, Vec::<String>::new());
    }
}
