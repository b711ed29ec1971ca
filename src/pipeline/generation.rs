//! Share generation: form fields in, mnemonic shares out

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::{DerivationPath, MasterSecret};
use crate::primitive::{ShareMnemonic, ShareSet, SplitError, SplitOptions, Splitter};
use crate::validate::{self, Field, ValidatedSplit, ValidationError};

/// Separator placed between shares in the output field
const SHARE_SEPARATOR: &str = "\n\n";

/// Raw generation fields, as typed by the user
#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationInput {
    pub secret: String,
    pub passphrase: String,
    pub total_shares: String,
    pub threshold: String,
}

impl fmt::Debug for GenerationInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationInput")
            .field("secret", &"<redacted>")
            .field("passphrase", &"<redacted>")
            .field("total_shares", &self.total_shares)
            .field("threshold", &self.threshold)
            .finish()
    }
}

/// What gets handed to the splitter
#[derive(Debug, Clone)]
pub struct SplitRequest {
    pub secret: MasterSecret,
    pub options: SplitOptions,
}

impl SplitRequest {
    /// Flat layout: `total_shares` groups of one share each, `threshold` groups required
    #[must_use]
    pub fn flat(validated: ValidatedSplit, passphrase: &str) -> Self {
        Self {
            options: SplitOptions::flat(validated.config, passphrase),
            secret: validated.secret,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Split(#[from] SplitError),
}

impl GenerationError {
    /// Field whose error slot shows this error
    ///
    /// Splitter failures are not expected once validation passed; they are
    /// reported under the secret.
    #[must_use]
    pub fn field(&self) -> Field {
        match self {
            Self::Invalid(e) => e.field(),
            Self::Split(_) => Field::Secret,
        }
    }
}

/// Mnemonics of one run, in share order
#[derive(Debug, Clone)]
pub struct GeneratedShares {
    mnemonics: Vec<ShareMnemonic>,
}

impl GeneratedShares {
    #[must_use]
    pub fn mnemonics(&self) -> &[ShareMnemonic] {
        &self.mnemonics
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mnemonics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mnemonics.is_empty()
    }

    /// Shares separated by a blank line, without trailing whitespace
    #[must_use]
    pub fn to_text(&self) -> Zeroizing<String> {
        let joined = Zeroizing::new(
            self.mnemonics
                .iter()
                .map(ShareMnemonic::as_str)
                .collect::<Vec<_>>()
                .join(SHARE_SEPARATOR),
        );
        Zeroizing::new(joined.trim_end().to_string())
    }
}

/// Validates the fields, splits the secret and collects one mnemonic per share
///
/// # Errors
/// Returns [`GenerationError::Invalid`] for the first rejected field, or
/// [`GenerationError::Split`] if the splitter refuses the request
///
/// # Examples
///
/// ```rust
/// use slip39_tool::pipeline::generation::{generate, GenerationInput};
/// use slip39_tool::slip39::Slip39;
///
/// let input = GenerationInput {
///     secret: "abcdef0123456789abcdef0123456789".into(),
///     total_shares: "3".into(),
///     threshold: "2".into(),
///     ..GenerationInput::default()
/// };
/// let shares = generate(&input, &Slip39).unwrap();
/// assert_eq!(shares.len(), 3);
/// ```
pub fn generate<S: Splitter>(
    input: &GenerationInput,
    splitter: &S,
) -> Result<GeneratedShares, GenerationError> {
    let validated = validate::validate(&input.secret, &input.total_shares, &input.threshold)?;
    let paths: Vec<DerivationPath> = validated.config.share_paths().collect();
    let request = SplitRequest::flat(validated, &input.passphrase);

    let shares = splitter.split(request.secret.as_bytes(), &request.options)?;

    let mut mnemonics = Vec::with_capacity(paths.len());
    for path in &paths {
        mnemonics.extend(shares.derive(path)?);
    }

    debug!(
        threshold = request.options.threshold,
        total_shares = paths.len(),
        "generated shares"
    );
    Ok(GeneratedShares { mnemonics })
}

/// Output fields of the generation form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationView {
    pub shares: String,
    pub secret_error: Option<String>,
    pub total_shares_error: Option<String>,
    pub threshold_error: Option<String>,
}

impl GenerationView {
    /// The error message currently shown, if any
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.secret_error
            .as_deref()
            .or(self.total_shares_error.as_deref())
            .or(self.threshold_error.as_deref())
    }

    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Secret => &mut self.secret_error,
            Field::TotalShares => &mut self.total_shares_error,
            Field::Threshold => &mut self.threshold_error,
        }
    }
}

/// Runs [`generate`] from a cleared view and renders the outcome
#[must_use]
pub fn run<S: Splitter>(input: &GenerationInput, splitter: &S) -> GenerationView {
    let mut view = GenerationView::default();
    match generate(input, splitter) {
        Ok(shares) => view.shares = shares.to_text().as_str().to_owned(),
        Err(e) => {
            debug!(field = %e.field(), "generation rejected");
            *view.slot(e.field()) = Some(e.to_string());
        }
    }
    view
}
