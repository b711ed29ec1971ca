//! WASM bindings for the browser page
//!
//! The page sends a snapshot of its form fields on every change and renders
//! the returned view. Objects cross the boundary either as plain JS values
//! (`serde-wasm-bindgen`) or as JSON strings.

use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

use crate::pipeline::generation::{self, GenerationInput, GenerationView};
use crate::pipeline::reconstruction::{self, ReconstructionInput, ReconstructionView};
use crate::secret::{self, Strength};
use crate::slip39::Slip39;

/// Initialize panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Use wee_alloc as the global allocator for smaller WASM binary size
#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(JsValue::from)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn generation_view(input: &GenerationInput) -> GenerationView {
    generation::run(input, &Slip39)
}

fn reconstruction_view(input: &ReconstructionInput) -> ReconstructionView {
    reconstruction::run(input, &Slip39)
}

/// Runs share generation on a field snapshot
///
/// # Example (JavaScript)
/// ```javascript
/// const view = generate_shares({
///     secret: "abcdef0123456789abcdef0123456789",
///     passphrase: "",
///     totalShares: "5",
///     threshold: "3",
/// });
/// if (view.secretError) { showError("secret", view.secretError); }
/// output.value = view.shares;
/// ```
#[wasm_bindgen]
pub fn generate_shares(input: JsValue) -> Result<JsValue, JsValue> {
    to_js(&generation_view(&from_js(input)?))
}

/// Runs reconstruction on a field snapshot
///
/// # Example (JavaScript)
/// ```javascript
/// const view = reconstruct_secret({ shares: textarea.value, passphrase: "" });
/// secretField.value = view.secret;
/// errorField.textContent = view.error ?? "";
/// ```
#[wasm_bindgen]
pub fn reconstruct_secret(input: JsValue) -> Result<JsValue, JsValue> {
    to_js(&reconstruction_view(&from_js(input)?))
}

/// JSON variant of [`generate_shares`]
#[wasm_bindgen]
pub fn generate_shares_json(input: &str) -> Result<String, JsValue> {
    let input: GenerationInput = serde_json::from_str(input)
        .map_err(|e| JsValue::from_str(&format!("Invalid input: {e}")))?;
    serde_json::to_string(&generation_view(&input))
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {e}")))
}

/// JSON variant of [`reconstruct_secret`]
#[wasm_bindgen]
pub fn reconstruct_secret_json(input: &str) -> Result<String, JsValue> {
    let input: ReconstructionInput = serde_json::from_str(input)
        .map_err(|e| JsValue::from_str(&format!("Invalid input: {e}")))?;
    serde_json::to_string(&reconstruction_view(&input))
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {e}")))
}

/// Random master secret as lowercase hex
///
/// `strength_bits` must be a multiple of 16 between 128 and 2048. The
/// getrandom crate (with the "js" feature) uses the browser's
/// `crypto.getRandomValues()`.
#[wasm_bindgen]
pub fn generate_secret(strength_bits: u16) -> Result<String, JsValue> {
    let strength = Strength::new(strength_bits).map_err(|e| JsValue::from_str(&e.to_string()))?;
    secret::generate_secret_hex(strength)
        .map(|hex| hex.as_str().to_owned())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_shares_json() {
        let json = generate_shares_json(
            r#"{"secret":"abcdef0123456789abcdef0123456789","totalShares":"3","threshold":"2"}"#,
        )
        .unwrap();
        let view: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(view["shares"].as_str().unwrap().split("\n\n").count(), 3);
        assert!(view["secretError"].is_null());
    }

    #[test]
    fn test_generate_shares_json_reports_field_error() {
        let json = generate_shares_json(
            r#"{"secret":"abcdef0123456789abcdef0123456789","totalShares":"0","threshold":"1"}"#,
        )
        .unwrap();
        let view: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(view["totalSharesError"], "Must be at least 1");
        assert_eq!(view["shares"], "");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let json = reconstruct_secret_json("{}").unwrap();
        let view: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(view["secret"], "");
        assert!(view["error"].is_null());
    }

    #[test]
    fn test_reconstruct_secret_json() {
        let input = serde_json::json!({
            "shares": "duckling enlarge academic academic agency result length solution fridge kidney coal piece deal husband erode duke ajar critical decision keyboard",
            "passphrase": "TREZOR",
        });
        let json = reconstruct_secret_json(&input.to_string()).unwrap();
        let view: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(view["secret"], "bb54aac4b89dc868ba37d9cc21b2cece");
    }

    #[test]
    fn test_generate_secret_length() {
        let hex = generate_secret(256).unwrap();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
