//! quill-macros - derive macros for quill
//!
//! This crate cannot depend on `quill-db`; generated code refers to it by
//! absolute path, so users need `quill-db` as a dependency.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod record;

/// Derive `quill_db::Record` for a struct with named fields.
///
/// Each field binds to the column named by `#[record(column = "...")]`, or to
/// its own name lower-cased. `#[record(skip)]` leaves a field out. Two fields
/// answering to the same column (case-insensitively) are rejected.
///
/// ```ignore
/// #[derive(Default, quill_db::Record)]
/// struct AppliedSeed {
///     #[record(column = "name")]
///     file_name: String,
///     applied_at: Option<chrono::NaiveDateTime>,
/// }
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::derive_record_impl(input).into()
}
