use std::collections::HashMap;

/// Occurrence counts for public suffixes.
///
/// Ranking sorts by descending count; equal counts keep the order in which
/// the suffixes were first recorded, so identical input always ranks the same.
#[derive(Debug, Default)]
pub struct SuffixTally {
    counts: HashMap<String, (usize, usize)>,
    total: usize,
}

impl SuffixTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, suffix: &str) {
        let first_seen = self.counts.len();
        match self.counts.get_mut(suffix) {
            Some((count, _)) => *count += 1,
            None => {
                self.counts.insert(suffix.to_string(), (1, first_seen));
            }
        }
        self.total += 1;
    }

    /// Number of recorded lines, duplicates included.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize, usize)> = self
            .counts
            .iter()
            .map(|(suffix, &(count, first_seen))| (suffix.as_str(), count, first_seen))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        entries
            .into_iter()
            .map(|(suffix, count, _)| (suffix, count))
            .collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SuffixTally {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tally = SuffixTally::new();
        for suffix in iter {
            tally.record(suffix.as_ref());
        }
        tally
    }
}
