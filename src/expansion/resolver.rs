//! Domain resolution for ambiguous keywords.
//!
//! Each candidate domain competes with an effective weight of
//! `domain.priority × entry.weight`. The heaviest candidate wins; equal
//! weights fall back to the alphabetically first domain name so the outcome
//! never depends on hash or document order.

use crate::synonym::{Candidate, Domain, SynonymEntry};

/// Upper bound on confidence whenever more than one domain matched.
pub const DEFAULT_AMBIGUITY_CAP: f64 = 0.99;

/// The winning candidate and how sure the resolver is about it.
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    pub domain: &'a Domain,
    pub entry: &'a SynonymEntry,
    /// `1.0` for a single candidate, otherwise in `(0.0, ambiguity_cap]`.
    pub confidence: f64,
    /// Number of domains that contained the keyword.
    pub competing: usize,
}

impl Resolution<'_> {
    pub fn is_ambiguous(&self) -> bool {
        self.competing > 1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DomainResolver {
    ambiguity_cap: f64,
}

impl Default for DomainResolver {
    fn default() -> Self {
        DomainResolver {
            ambiguity_cap: DEFAULT_AMBIGUITY_CAP,
        }
    }
}

impl DomainResolver {
    /// Create a resolver with a custom ambiguity cap.
    ///
    /// The cap is clamped into `(0.0, 0.99]`; non-finite or non-positive
    /// values fall back to the default.
    pub fn new(ambiguity_cap: f64) -> Self {
        let ambiguity_cap = if ambiguity_cap.is_finite() && ambiguity_cap > 0.0 {
            ambiguity_cap.min(DEFAULT_AMBIGUITY_CAP)
        } else {
            DEFAULT_AMBIGUITY_CAP
        };
        DomainResolver { ambiguity_cap }
    }

    pub fn ambiguity_cap(&self) -> f64 {
        self.ambiguity_cap
    }

    /// Effective competing weight of a candidate.
    pub fn candidate_weight(candidate: &Candidate<'_>) -> f64 {
        f64::from(candidate.domain.priority()) * candidate.entry.weight
    }

    /// Pick the winning domain among `candidates`, if there are any.
    pub fn resolve<'a, I>(&self, candidates: I) -> Option<Resolution<'a>>
    where
        I: IntoIterator<Item = Candidate<'a>>,
    {
        let scored: Vec<(Candidate<'a>, f64)> = candidates
            .into_iter()
            .map(|c| (c, Self::candidate_weight(&c)))
            .collect();

        let (winner, winning_weight) = scored.iter().copied().min_by(|(a, wa), (b, wb)| {
            wb.total_cmp(wa)
                .then_with(|| a.domain.name().cmp(b.domain.name()))
        })?;

        let confidence = if scored.len() == 1 {
            1.0
        } else {
            let total: f64 = scored.iter().map(|(_, w)| w).sum();
            let share = if total.is_finite() {
                winning_weight / total
            } else {
                // Same ratio without overflowing the sum.
                1.0 / scored.iter().map(|(_, w)| w / winning_weight).sum::<f64>()
            };
            share.min(self.ambiguity_cap)
        };

        Some(Resolution {
            domain: winner.domain,
            entry: winner.entry,
            confidence,
            competing: scored.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synonym::{DictionarySource, SynonymDictionary};

    fn dictionary(text: &str) -> SynonymDictionary {
        SynonymDictionary::load(&DictionarySource::yaml(text)).unwrap()
    }

    #[test]
    fn test_single_candidate_is_certain() {
        let dict = dictionary("domains:\n  networking:\n    priority: 2\n    keywords:\n      lan: [x]\n");
        let resolution = DomainResolver::default()
            .resolve(dict.candidates("lan"))
            .unwrap();
        assert_eq!(resolution.domain.name(), "networking");
        assert_eq!(resolution.confidence, 1.0);
        assert!(!resolution.is_ambiguous());
    }

    #[test]
    fn test_no_candidates() {
        let dict = SynonymDictionary::empty();
        assert!(DomainResolver::default().resolve(dict.candidates("lan")).is_none());
    }

    #[test]
    fn test_priority_wins() {
        let dict = dictionary(
            r#"
domains:
  government:
    priority: 3
    keywords:
      api: [application]
  cloud:
    priority: 10
    keywords:
      api: [application programming interface]
"#,
        );
        let resolution = DomainResolver::default()
            .resolve(dict.candidates("api"))
            .unwrap();
        assert_eq!(resolution.domain.name(), "cloud");
        assert_eq!(resolution.competing, 2);
        assert!((resolution.confidence - 10.0 / 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_entry_weight_scales_priority() {
        let dict = dictionary(
            r#"
domains:
  cloud:
    priority: 10
    keywords:
      load:
        phrases: [load balancer]
        weight: 0.2
  logistics:
    priority: 4
    keywords:
      load: [freight load]
"#,
        );
        let resolution = DomainResolver::default()
            .resolve(dict.candidates("load"))
            .unwrap();
        // 10 * 0.2 = 2 loses to 4 * 1.0
        assert_eq!(resolution.domain.name(), "logistics");
        assert!((resolution.confidence - 4.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_tie_breaks_alphabetically() {
        let dict = dictionary(
            r#"
domains:
  zeta:
    priority: 5
    keywords:
      ca: [z]
  alpha:
    priority: 5
    keywords:
      ca: [a]
"#,
        );
        let resolution = DomainResolver::default()
            .resolve(dict.candidates("ca"))
            .unwrap();
        assert_eq!(resolution.domain.name(), "alpha");
        assert_eq!(resolution.confidence, 0.5);
    }

    #[test]
    fn test_confidence_is_capped() {
        let dict = dictionary(
            r#"
domains:
  big:
    priority: 100000
    keywords:
      x: [a]
  small:
    keywords:
      x: [b]
"#,
        );
        let resolution = DomainResolver::default()
            .resolve(dict.candidates("x"))
            .unwrap();
        assert_eq!(resolution.domain.name(), "big");
        assert_eq!(resolution.confidence, 0.99);

        let strict = DomainResolver::new(0.6).resolve(dict.candidates("x")).unwrap();
        assert_eq!(strict.confidence, 0.6);
    }

    #[test]
    fn test_cap_is_clamped() {
        assert_eq!(DomainResolver::new(1.5).ambiguity_cap(), 0.99);
        assert_eq!(DomainResolver::new(f64::NAN).ambiguity_cap(), 0.99);
        assert_eq!(DomainResolver::new(-1.0).ambiguity_cap(), 0.99);
        assert_eq!(DomainResolver::new(0.5).ambiguity_cap(), 0.5);
    }
}
