// third-party imports
use owo_colors::OwoColorize;

// sub-modules
pub mod suggest;

// re-exports
pub use suggest::Suggestions;

// ---

/// Highlights a value in messages written to stderr.
pub trait Highlight {
    fn hl(&self) -> String;
}

impl<S: AsRef<str> + ?Sized> Highlight for S {
    fn hl(&self) -> String {
        self.as_ref().yellow().to_string()
    }
}

/// Quotes and highlights a value.
pub trait HighlightQuoted {
    fn hlq(&self) -> String;
}

impl<S: AsRef<str> + ?Sized> HighlightQuoted for S {
    fn hlq(&self) -> String {
        format!("{:?}", self.as_ref()).hl()
    }
}

#[cfg(test)]
mod tests;
