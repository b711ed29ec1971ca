use anyhow::{Context, Result, anyhow, bail};
use serde::Serialize;
use zeroize::Zeroizing;

use crate::pipeline::generation::{self, GenerationInput, GenerationView};
use crate::pipeline::reconstruction::{self, ReconstructionInput};
use crate::secret::{self, Strength};
use crate::slip39::Slip39;

/// JSON output of `split`, carrying the secret when it was generated here
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SplitOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    generated_secret: Option<&'a str>,
    #[serde(flatten)]
    view: GenerationView,
}

/// Split a hex master secret into SLIP-39 shares
///
/// Plain output is the shares separated by blank lines. With `generated` the
/// secret itself is printed first, since it exists nowhere else.
///
/// # Errors
/// Returns the first field error in plain mode; in JSON mode field errors are
/// part of the view and only serialization can fail
pub fn split_secret(
    input: &GenerationInput,
    generated: bool,
    json: bool,
) -> Result<Zeroizing<String>> {
    if json {
        let output = SplitOutput {
            generated_secret: generated.then_some(input.secret.as_str()),
            view: generation::run(input, &Slip39),
        };
        let rendered =
            serde_json::to_string_pretty(&output).context("Failed to serialize shares")?;
        return Ok(Zeroizing::new(rendered));
    }

    let shares = generation::generate(input, &Slip39)
        .map_err(|e| anyhow!("Invalid {}: {e}", e.field()))?;
    let text = shares.to_text();

    if generated {
        return Ok(Zeroizing::new(format!("{}\n\n{}", input.secret, *text)));
    }
    Ok(text)
}

/// Combine SLIP-39 shares to recover the master secret as hex
///
/// # Errors
/// Returns an error if no shares were given or the shares do not combine
pub fn combine_shares(input: &ReconstructionInput, json: bool) -> Result<Zeroizing<String>> {
    if json {
        let view = reconstruction::run(input, &Slip39);
        let rendered =
            serde_json::to_string_pretty(&view).context("Failed to serialize secret")?;
        return Ok(Zeroizing::new(rendered));
    }

    match reconstruction::recover(input, &Slip39).context("Failed to combine shares")? {
        Some(secret) => Ok(secret.to_hex()),
        None => bail!("No shares provided"),
    }
}

/// Generate a random master secret as hex
///
/// # Errors
/// Returns an error if the platform random source is unavailable
pub fn generate_secret(strength: Strength) -> Result<Zeroizing<String>> {
    secret::generate_secret_hex(strength).context("Failed to generate master secret")
}
