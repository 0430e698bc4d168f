// third-party imports
use thiserror::Error;

// ---

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid token {token:?}")]
    InvalidToken { token: String },
    #[error("index out of range for token {token:?}")]
    IndexOutOfRange { token: String },
}

// ---

/// Result of a completed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    /// 1-based position in the history.
    pub ordinal: usize,
    pub text: String,
}

/// Results of all completed commands, oldest first.
#[derive(Debug, Clone, Default)]
pub struct OutputHistory {
    records: Vec<OutputRecord>,
}

impl OutputHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>) -> &OutputRecord {
        let ordinal = self.records.len() + 1;
        self.records.push(OutputRecord {
            ordinal,
            text: text.into(),
        });
        &self.records[ordinal - 1]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&OutputRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutputRecord> {
        self.records.iter()
    }

    /// Resolves a reference number to a zero-based index.
    ///
    /// Zero and negative numbers count back from the newest record, `0`
    /// being the newest. Positive numbers are 1-based positions from the
    /// oldest record, matching [`OutputRecord::ordinal`].
    pub fn resolve(&self, n: i64) -> Option<usize> {
        let len = i64::try_from(self.records.len()).ok()?;
        let index = if n <= 0 { len - 1 + n } else { n - 1 };
        if (0..len).contains(&index) {
            usize::try_from(index).ok()
        } else {
            None
        }
    }
}

// ---

/// Replaces output references in `args`.
///
/// * `null` becomes an empty string;
/// * `%N` becomes the text of the output addressed by `N`, see
///   [`OutputHistory::resolve`]; `~` in front of the number negates it, so
///   `%~1` is the output before the newest one, same as `%-1`;
/// * a token of `%` characters only counts back by repetition: `%` is `%0`,
///   `%%` is `%~1` and so on;
/// * everything else is kept as is.
///
/// Either all tokens are substituted or an error is returned for the first
/// one that cannot be.
pub fn substitute<S>(history: &OutputHistory, args: &[S]) -> Result<Vec<String>>
where
    S: AsRef<str>,
{
    args.iter()
        .map(|arg| substitute_token(history, arg.as_ref()))
        .collect()
}

fn substitute_token(history: &OutputHistory, token: &str) -> Result<String> {
    if token == "null" {
        return Ok(String::new());
    }

    let Some(body) = token.strip_prefix('%') else {
        return Ok(token.to_owned());
    };

    let n = parse_reference(body).ok_or_else(|| Error::InvalidToken {
        token: token.to_owned(),
    })?;

    let record = history
        .resolve(n)
        .and_then(|index| history.get(index))
        .ok_or_else(|| Error::IndexOutOfRange {
            token: token.to_owned(),
        })?;

    log::debug!("substitute {token} with output [{}]", record.ordinal);
    Ok(record.text.clone())
}

/// Parses the part of a reference after the leading `%`.
fn parse_reference(body: &str) -> Option<i64> {
    if body.bytes().all(|b| b == b'%') {
        return i64::try_from(body.len()).ok().map(|n| -n);
    }

    let (negative, digits) = match body.as_bytes().first()? {
        b'~' | b'-' => (true, &body[1..]),
        b'+' => (false, &body[1..]),
        _ => (false, body),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // Only overflow is left to fail, and no record is that far away.
    let n: i64 = digits.parse().unwrap_or(i64::MAX);
    Some(if negative { -n } else { n })
}
