//! Public suffix rules used for every extraction in a run.
//!
//! A [`SuffixDatabase`] is built once at startup and passed by reference into
//! each lookup. Rules come either from the list compiled into the `psl` crate
//! or from a PSL-format file parsed with `publicsuffix`. Custom suffixes and
//! the private-rule switch layer on top of whichever list is in use.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use tracing::{debug, info};

use crate::args::SuffixOptions;
use crate::error::ToolError;

enum Rules {
    Builtin(psl::List),
    Loaded(publicsuffix::List),
}

/// Best rule the collaborator found for a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RuleMatch {
    len: usize,
    known: bool,
    private: bool,
}

impl Rules {
    fn lookup(&self, name: &[u8]) -> Option<RuleMatch> {
        match self {
            Rules::Builtin(list) => {
                let suffix = psl::Psl::suffix(list, name)?;
                Some(RuleMatch {
                    len: suffix.as_bytes().len(),
                    known: suffix.is_known(),
                    private: suffix.typ() == Some(psl::Type::Private),
                })
            }
            Rules::Loaded(list) => {
                let suffix = publicsuffix::Psl::suffix(list, name)?;
                Some(RuleMatch {
                    len: suffix.as_bytes().len(),
                    known: suffix.is_known(),
                    private: suffix.typ() == Some(publicsuffix::Type::Private),
                })
            }
        }
    }

    fn source(&self) -> &'static str {
        match self {
            Rules::Builtin(_) => "builtin",
            Rules::Loaded(_) => "file",
        }
    }
}

pub struct SuffixDatabase {
    rules: Rules,
    custom: HashSet<String>,
    include_private: bool,
}

impl SuffixDatabase {
    /// Database backed by the list compiled into the binary.
    pub fn builtin() -> Self {
        Self::with_rules(Rules::Builtin(psl::List))
    }

    /// Parses PSL-format text. ICANN and PRIVATE sections are recognised by
    /// their `===BEGIN ... DOMAINS===` marker comments.
    pub fn from_rules(text: &str, origin: &Path) -> Result<Self, ToolError> {
        let list = publicsuffix::List::from_str(text).map_err(|e| ToolError::SuffixList {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self::with_rules(Rules::Loaded(list)))
    }

    pub fn from_file(path: &Path) -> Result<Self, ToolError> {
        let start_time = Instant::now();
        let text = fs::read_to_string(path).map_err(|e| ToolError::SuffixList {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let database = Self::from_rules(&text, path)?;

        info!(
            action = "loaded",
            component = "suffix_database",
            file_path = ?path,
            duration_ms = start_time.elapsed().as_millis(),
            "Loaded public suffix list from file"
        );
        Ok(database)
    }

    /// Builds the database described by the shared command-line options.
    pub fn from_options(options: &SuffixOptions) -> Result<Self, ToolError> {
        let mut database = match &options.psl {
            Some(path) => Self::from_file(path)?,
            None => Self::builtin(),
        }
        .include_private(options.private);

        if let Some(custom) = &options.custom {
            for suffix in custom.split(',') {
                database.add_custom_suffix(suffix);
            }
        }

        info!(
            action = "ready",
            component = "suffix_database",
            source = database.rules.source(),
            include_private = database.include_private,
            custom_suffixes = database.custom.len(),
            "Suffix database ready"
        );
        Ok(database)
    }

    fn with_rules(rules: Rules) -> Self {
        Self {
            rules,
            custom: HashSet::new(),
            include_private: false,
        }
    }

    pub fn include_private(mut self, include: bool) -> Self {
        self.include_private = include;
        self
    }

    /// Registers an extra suffix rule. Returns `false` for entries that are
    /// empty after trimming and normalization.
    pub fn add_custom_suffix(&mut self, suffix: &str) -> bool {
        let suffix = suffix.trim().trim_matches('.').to_lowercase();
        if suffix.is_empty() {
            return false;
        }
        debug!(action = "add", component = "custom_suffix", suffix = %suffix, "Added custom suffix");
        self.custom.insert(suffix);
        true
    }

    /// Byte length of the best known public suffix at the end of `host`.
    ///
    /// `host` must already be normalized (lowercase, no trailing dot). Returns
    /// `None` when neither the list nor the custom rules know the suffix.
    pub fn known_suffix_len(&self, host: &str) -> Option<usize> {
        let listed = self.listed_suffix_len(host);
        let custom = self.custom_suffix_len(host);

        match (listed, custom) {
            (Some(listed), Some(custom)) => {
                let listed_labels = label_count(&host[host.len() - listed..]);
                let custom_labels = label_count(&host[host.len() - custom..]);
                Some(if custom_labels > listed_labels { custom } else { listed })
            }
            (listed, custom) => listed.or(custom),
        }
    }

    fn listed_suffix_len(&self, host: &str) -> Option<usize> {
        let mut candidate = host;
        loop {
            let found = self.rules.lookup(candidate.as_bytes())?;
            if !found.known || found.len == 0 {
                return None;
            }
            if self.include_private || !found.private {
                return Some(found.len);
            }

            // Fall back from a private rule to the rule under it.
            let suffix = &candidate[candidate.len() - found.len..];
            candidate = match suffix.split_once('.') {
                Some((_, parent)) => parent,
                None => return None,
            };
        }
    }

    fn custom_suffix_len(&self, host: &str) -> Option<usize> {
        if self.custom.is_empty() {
            return None;
        }
        let mut rest = host;
        loop {
            if self.custom.contains(rest) {
                return Some(rest.len());
            }
            rest = rest.split_once('.')?.1;
        }
    }
}

fn label_count(name: &str) -> usize {
    name.split('.').count()
}
