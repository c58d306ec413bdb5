//! # Utility Functions Module
//!
//! Helpers for building subprocess argument vectors.

/// Build a `Vec<String>` argument vector from values of mixed `Display` types.
///
/// # Example
/// ```rust
/// use web_media_compressor::args;
///
/// let crf = 20;
/// let args = args!["-crf", crf, "-y"];
/// assert_eq!(args, vec!["-crf", "20", "-y"]);
/// ```
#[macro_export]
macro_rules! args {
    [$($item:expr),* $(,)?] => {
        vec![$(::std::string::ToString::to_string(&$item)),*]
    };
}
