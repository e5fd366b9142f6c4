// UI layer: terminal presentation around the blocking API calls. A
// spinner runs while a request is in flight; responses print under a
// `Response:` banner and errors come back with the raw server body
// attached when there is one.

use std::fmt;
use std::time::Duration;

use anyhow::anyhow;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::ApiError;

/// Run a blocking API call behind a spinner. The spinner is cleared
/// before the result (or its error) is printed.
pub fn fetch<T>(
    message: &'static str,
    call: impl FnOnce() -> Result<T, ApiError>,
) -> Result<T, ApiError> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = call();

    spinner.finish_and_clear();
    result
}

/// Turn an [`ApiError`] into the report the binary prints. A failure
/// that captured a server body gets it appended verbatim.
pub fn describe(err: ApiError) -> anyhow::Error {
    match &err {
        ApiError::Request(request) if !request.body.is_empty() => {
            anyhow!("{err}\n\nBody:\n{}", request.body)
        }
        _ => anyhow::Error::new(err),
    }
}

/// Print a rendered response table.
pub fn print_response(response: impl fmt::Display) {
    println!("Response: \n{response}");
}
