//! Skill taxonomy: canonical skill names, their aliases, and compiled
//! whole-word regexes for the lexical scan.
//!
//! Aliases may collide across entries in source data. Resolution is explicit
//! and deterministic: entries are held in canonical-name order and the first
//! entry to claim an alias keeps it; later claimants are dropped with a
//! `warn!`. No matching behavior depends on incidental map ordering.

use std::collections::BTreeMap;
use std::collections::HashSet;

use regex::Regex;
use tracing::warn;

/// One canonical skill with its alias patterns.
#[derive(Debug, Clone)]
pub struct TaxonomyEntry {
    pub canonical: String,
    pub aliases: Vec<String>,
    pub category: String,
    /// Case-insensitive whole-word patterns for the canonical name and each
    /// surviving alias. Compiled once at load.
    patterns: Vec<Regex>,
}

impl TaxonomyEntry {
    /// True if the canonical name or any alias occurs as a whole word.
    pub fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }
}

/// The alias taxonomy. Immutable after construction.
#[derive(Debug, Clone)]
pub struct SkillTaxonomy {
    entries: Vec<TaxonomyEntry>,
}

impl SkillTaxonomy {
    /// Builds the taxonomy from (canonical, aliases, category) triples.
    /// Entries are sorted by canonical name and duplicate aliases are
    /// resolved first-claimant-wins.
    pub fn from_entries(raw: Vec<(String, Vec<String>, String)>) -> Self {
        let mut sorted: BTreeMap<String, (Vec<String>, String)> = BTreeMap::new();
        for (canonical, aliases, category) in raw {
            sorted.insert(canonical, (aliases, category));
        }

        let mut claimed: HashSet<String> = HashSet::new();
        // Canonical names always own themselves, whatever their aliases say.
        for canonical in sorted.keys() {
            claimed.insert(canonical.to_lowercase());
        }

        let mut entries = Vec::with_capacity(sorted.len());
        for (canonical, (aliases, category)) in sorted {
            let canonical_lower = canonical.to_lowercase();
            let mut kept = Vec::new();
            for alias in aliases {
                let alias_lower = alias.to_lowercase();
                if alias_lower == canonical_lower {
                    continue; // the canonical pattern already covers it
                }
                if claimed.insert(alias_lower) {
                    kept.push(alias);
                } else {
                    warn!(
                        "Taxonomy alias '{alias}' already claimed; dropping it from '{canonical}'"
                    );
                }
            }

            let mut patterns = Vec::with_capacity(kept.len() + 1);
            patterns.push(whole_word_pattern(&canonical));
            patterns.extend(kept.iter().map(|a| whole_word_pattern(a)));

            entries.push(TaxonomyEntry {
                canonical,
                aliases: kept,
                category,
                patterns,
            });
        }

        Self { entries }
    }

    /// The built-in taxonomy shipped with the engine.
    pub fn builtin() -> Self {
        let tech = |c: &str, aliases: &[&str]| {
            (
                c.to_string(),
                aliases.iter().map(|a| a.to_string()).collect(),
                "technical".to_string(),
            )
        };
        let soft = |c: &str, aliases: &[&str]| {
            (
                c.to_string(),
                aliases.iter().map(|a| a.to_string()).collect(),
                "soft".to_string(),
            )
        };

        Self::from_entries(vec![
            tech("Python", &["py"]),
            tech("Java", &[]),
            tech("JavaScript", &["js", "node"]),
            tech("TypeScript", &["ts"]),
            tech("React", &["reactjs"]),
            tech("SQL", &["mysql"]),
            tech("PostgreSQL", &["postgres"]),
            tech("Git", &["github", "version control"]),
            tech("Docker", &["containerization"]),
            tech("Kubernetes", &["k8s"]),
            tech("REST APIs", &["rest", "rest api"]),
            tech("Machine Learning", &["ml", "deep learning"]),
            tech("Statistics", &["stats"]),
            tech("R", &["r programming", "r language"]),
            tech("AWS", &["amazon web services"]),
            tech("Tableau", &["tableau desktop"]),
            tech("Spring Boot", &["spring"]),
            tech("CSS", &["styling"]),
            tech("Testing", &["jest", "pytest"]),
            soft("Communication", &["presentation"]),
        ])
    }

    pub fn entries(&self) -> &[TaxonomyEntry] {
        &self.entries
    }

    /// Canonical names in taxonomy order (sorted).
    pub fn canonical_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.canonical.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn whole_word_pattern(term: &str) -> Regex {
    // Escaped terms cannot introduce invalid syntax, so this cannot fail.
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(term)))
        .unwrap_or_else(|e| unreachable!("escaped pattern failed to compile: {e}"))
}
