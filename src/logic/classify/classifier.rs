//! Family Classifier / PUP Detector
//!
//! Walks a ranked list against the taxonomy.
//! Input: ranked tags, taxonomy, policy. Output: `Verdict`.

use super::rules::{ClassifierPolicy, PupPolicy};
use super::types::{Family, ScoredTag, Verdict};
use crate::logic::ranking::RankedTag;
use crate::logic::tables::{Category, Taxonomy};

// ============================================================================
// MAIN CLASSIFICATION FUNCTION
// ============================================================================

/// Pick family and PUP flag. `singleton_hash` names the sample when no
/// ranked token can serve as family.
pub fn classify(
    tags: &[RankedTag],
    taxonomy: &Taxonomy,
    policy: &ClassifierPolicy,
    singleton_hash: &str,
) -> Verdict {
    let family = match select_family(tags, taxonomy, policy) {
        Some(tag) => Family::Named(tag.to_string()),
        None => Family::Singleton(singleton_hash.to_string()),
    };
    let is_pup = is_pup(tags, taxonomy, &policy.pup);

    log::debug!("family={} pup={} from {} ranked tags", family, is_pup, tags.len());
    Verdict { family, is_pup }
}

/// First `FAM`/`UNK` token; with the fallback enabled, else the first `PUP`
/// token
pub fn select_family<'t>(
    tags: &'t [RankedTag],
    taxonomy: &Taxonomy,
    policy: &ClassifierPolicy,
) -> Option<&'t str> {
    let first_of = |wanted: fn(Category) -> bool| {
        tags.iter()
            .find(|t| wanted(taxonomy.category(&t.tag)))
            .map(|t| t.tag.as_str())
    };

    first_of(|c| c.is_family_like()).or_else(|| {
        if policy.pup_family_fallback {
            first_of(|c| c == Category::Pup)
        } else {
            None
        }
    })
}

/// Whether a PUP indicator sits among the leading ranked tokens
pub fn is_pup(tags: &[RankedTag], taxonomy: &Taxonomy, policy: &PupPolicy) -> bool {
    leading_window(tags, policy)
        .iter()
        .any(|t| is_pup_indicator(&t.tag, taxonomy, policy))
}

/// The prefix of the ranked list the PUP detector inspects
pub fn leading_window<'t>(tags: &'t [RankedTag], policy: &PupPolicy) -> &'t [RankedTag] {
    let mut end = policy.leading_tokens.min(tags.len());
    if end == 0 {
        return &[];
    }
    if policy.include_ties {
        let boundary = tags[end - 1].count;
        while end < tags.len() && tags[end].count == boundary {
            end += 1;
        }
    }
    &tags[..end]
}

fn is_pup_indicator(tag: &str, taxonomy: &Taxonomy, policy: &PupPolicy) -> bool {
    match taxonomy.get(tag) {
        Some(entry) => entry.category == Category::Pup || policy.matches_path(&entry.path),
        None => false,
    }
}

/// Attach category and path to each ranked tag
pub fn score_tags(tags: &[RankedTag], taxonomy: &Taxonomy) -> Vec<ScoredTag> {
    tags.iter()
        .map(|t| ScoredTag {
            tag: t.tag.clone(),
            count: t.count,
            category: taxonomy.category(&t.tag),
            path: taxonomy.path(&t.tag),
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn taxonomy() -> Taxonomy {
        let mut tax = Taxonomy::new();
        tax.insert("zbot", Category::Family, Some("FAM:win32.zbot"));
        tax.insert("toolbar", Category::Pup, None);
        tax.insert("adware", Category::Class, Some("CLASS:grayware:adware"));
        tax.insert("spam", Category::Behavior, None);
        tax.insert("pdf", Category::FileProperty, None);
        tax
    }

    fn ranked(items: &[(&str, usize)]) -> Vec<RankedTag> {
        items.iter().map(|(t, c)| RankedTag::new(t, *c)).collect()
    }

    #[test]
    fn test_family_skips_non_family_categories() {
        let tags = ranked(&[("spam", 5), ("pdf", 4), ("zbot", 3)]);
        let v = classify(&tags, &taxonomy(), &ClassifierPolicy::default(), "hash");
        assert_eq!(v.family, Family::Named("zbot".into()));
        assert!(!v.is_pup);
    }

    #[test]
    fn test_unknown_token_is_family_candidate() {
        let tags = ranked(&[("spam", 5), ("newfam", 2), ("zbot", 1)]);
        let v = classify(&tags, &taxonomy(), &ClassifierPolicy::default(), "hash");
        assert_eq!(v.family.to_string(), "newfam");
    }

    #[test]
    fn test_singleton_fallback() {
        let v = classify(&[], &taxonomy(), &ClassifierPolicy::default(), "d41d8cd9");
        assert_eq!(v.family.to_string(), "SINGLETON:d41d8cd9");
        assert!(!v.is_pup);

        let tags = ranked(&[("spam", 2), ("pdf", 1)]);
        let v = classify(&tags, &taxonomy(), &ClassifierPolicy::default(), "abc");
        assert!(v.family.is_singleton());
    }

    #[test]
    fn test_pup_only_candidates_are_singleton_by_default() {
        let tags = ranked(&[("toolbar", 2), ("adware", 1)]);
        let v = classify(&tags, &taxonomy(), &ClassifierPolicy::default(), "abc");
        assert_eq!(v.family, Family::Singleton("abc".into()));
        assert!(v.is_pup);
    }

    #[test]
    fn test_pup_family_fallback_opt_in() {
        let tags = ranked(&[("toolbar", 2), ("adware", 1)]);
        let policy = ClassifierPolicy::default().with_pup_family_fallback(true);
        let v = classify(&tags, &taxonomy(), &policy, "abc");
        assert_eq!(v.family.to_string(), "toolbar");
        assert!(v.is_pup);
    }

    #[test]
    fn test_pup_only_in_leading_window() {
        let tax = taxonomy();
        let tags = ranked(&[("zbot", 10), ("spam", 4), ("adware", 2)]);
        assert!(!is_pup(&tags, &tax, &PupPolicy::default()));
        assert!(is_pup(&tags, &tax, &PupPolicy::lenient()));
        assert!(is_pup(&tags, &tax, &PupPolicy::whole_list()));
    }

    #[test]
    fn test_pup_ties_extend_window() {
        let tax = taxonomy();
        let tags = ranked(&[("zbot", 3), ("adware", 3), ("spam", 1)]);
        assert!(is_pup(&tags, &tax, &PupPolicy::default()));
        assert!(!is_pup(&tags, &tax, &PupPolicy::strict()));
    }

    #[test]
    fn test_leading_window_bounds() {
        let tags = ranked(&[("a1", 2), ("b1", 2), ("c1", 1)]);
        assert!(leading_window(&tags, &PupPolicy::default().with_leading_tokens(0)).is_empty());
        assert_eq!(leading_window(&tags, &PupPolicy::default()).len(), 2);
        assert_eq!(leading_window(&tags, &PupPolicy::whole_list()).len(), 3);
        assert!(leading_window(&[], &PupPolicy::default()).is_empty());
    }

    #[test]
    fn test_score_tags() {
        let scored = score_tags(&ranked(&[("zbot", 3), ("other", 1)]), &taxonomy());
        assert_eq!(scored[0].path, "FAM:win32.zbot");
        assert_eq!(scored[1].category, Category::Unknown);
        assert_eq!(scored[1].path, "UNK:other");
    }
}
