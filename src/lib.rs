// Library root
// -----------
// Client library for the word-frequency HTTP API, used by the
// `wordfreq-cli` binary.
//
// Module responsibilities:
// - `api`: the blocking HTTP client — login, bearer-token transport,
//   the shared GET + dispatch helper and the three public operations.
// - `response`: the `page`-tagged response shapes, their two-phase
//   decode and their text-table rendering.
// - `error`: structured error types carrying URL, status and body.
// - `ui`: terminal presentation — request spinner, output printing,
//   error reports.

pub mod api;
pub mod error;
pub mod response;
pub mod ui;
