pub const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    limit: usize,
    used: usize,
}

impl Budget {
    pub fn new(limit: usize) -> Self {
        Budget { limit, used: 0 }
    }

    pub fn used(&self) -> usize {
        self.used
    }

    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.used)
    }

    pub fn is_exhausted(&self) -> bool {
        self.used >= self.limit
    }

    /// Charges `text` against the allowance.
    ///
    /// Text that stays strictly under the limit is admitted whole. Otherwise
    /// the head that still fits is admitted with an ellipsis appended and the
    /// budget is spent. Returns `None` once nothing is left.
    pub fn admit(&mut self, text: &str) -> Option<String> {
        if self.is_exhausted() {
            return None;
        }

        let length = text.chars().count();
        if self.used + length < self.limit {
            self.used += length;
            return Some(text.to_string());
        }

        let head: String = text.chars().take(self.remaining()).collect();
        self.used = self.limit;
        Some(format!("{}{}", head, ELLIPSIS))
    }

    pub fn fill<I>(&mut self, candidates: I, cap: usize) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut kept = Vec::new();
        for candidate in candidates {
            if kept.len() >= cap {
                break;
            }
            match self.admit(&candidate) {
                Some(text) => kept.push(text),
                None => break,
            }
            if self.is_exhausted() {
                break;
            }
        }
        kept
    }
}
