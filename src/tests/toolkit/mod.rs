//! Synthetic content, formatted the way real files are
mod ionex;
mod sao;

pub use ionex::{IonexBuilder, TestMap};
pub use sao::SaoBuilder;

/// Formats one labeled record: content up to column 60, then label
pub fn labeled(content: &str, label: &str) -> String {
    format!("{:<60}{:<20}\n", content, label)
}
