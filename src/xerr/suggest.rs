// std imports
use std::cmp::Ordering;

const MIN_RELEVANCE: f64 = 0.75;

/// Known names similar to a mistyped one, most relevant first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Suggestions {
    candidates: Vec<(f64, String)>,
}

impl Suggestions {
    pub fn new<T, I>(wanted: &str, variants: I) -> Self
    where
        T: AsRef<str>,
        I: IntoIterator<Item = T>,
    {
        let mut candidates: Vec<(f64, String)> = variants
            .into_iter()
            .map(|variant| {
                let variant = variant.as_ref();
                (strsim::jaro(wanted, variant), variant.to_owned())
            })
            .filter(|(relevance, _)| *relevance > MIN_RELEVANCE)
            .collect();

        candidates.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

        Self { candidates }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.candidates.iter().map(|(_, candidate)| candidate.as_str())
    }
}
