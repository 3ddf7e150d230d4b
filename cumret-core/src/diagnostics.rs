/// Ordered, append-only list of human-readable validation messages.
///
/// One instance belongs to one processing run and is handed down by `&mut`
/// to every stage. Order of entries is order of detection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    messages: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(%message, "diagnostic recorded");
        self.messages.push(message);
    }

    pub fn extend<I>(&mut self, messages: I)
    where
        I: IntoIterator<Item = String>,
    {
        for m in messages {
            self.push(m);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// True while nothing has been recorded.
    pub fn is_valid(&self) -> bool {
        self.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.messages.iter()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn into_vec(self) -> Vec<String> {
        self.messages
    }

    /// Display form: every entry followed by `,`, trailing comma trimmed.
    pub fn joined(&self) -> String {
        self.messages.join(",")
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
