//! Article inclusion/exclusion predicates.
//!
//! Pure functions, total over well-formed inputs. These encode the
//! label-derivation rules: which articles belong to the selectively-indexed
//! corpus, which are editorial artifacts, which come from known-noisy
//! journals, and which carry a trustworthy ground-truth label.

use std::collections::HashSet;

use chrono::NaiveDate;

use bmcs_common::{Article, IndexingPeriodMap, BMCS_UNCERTAIN_RESULT};

/// True iff the article's journal has a period covering its publication
/// year, boundary years excluded.
///
/// The inequalities are strict on both ends: a period's boundary years are
/// ambiguous transition years, not cleanly selective. The first matching
/// period short-circuits; behavior is undefined for journals whose period
/// lists overlap (the upstream extraction is expected not to produce any).
pub fn is_selectively_indexed(periods: &IndexingPeriodMap, article: &Article) -> bool {
    let Some(journal_periods) = periods.get(&article.journal_nlmid) else {
        return false;
    };
    journal_periods.iter().any(|period| {
        article.pub_year > period.start_year
            && period
                .end_year
                .map_or(true, |end_year| article.pub_year < end_year)
    })
}

/// True iff the article carries a RefType from the exclusion set
/// (corrections, retractions, errata and the like) — articles whose
/// index-worthiness is an artifact of editorial bookkeeping.
pub fn has_excluded_ref_type(excluded_ref_types: &HashSet<String>, article: &Article) -> bool {
    article
        .ref_types
        .iter()
        .any(|ref_type| excluded_ref_types.contains(ref_type))
}

/// True iff the article's journal is in the known-noisy set and it was
/// completed before the cutoff year (a data-quality regime change).
///
/// The completion year falls back to the revision date when no completion
/// date exists; an article with neither is never problematic.
pub fn is_problematic_article(
    problematic_journals: &HashSet<String>,
    cutoff_year: i32,
    article: &Article,
) -> bool {
    if !problematic_journals.contains(&article.journal_nlmid) {
        return false;
    }
    article
        .completion_year()
        .map_or(false, |year| year < cutoff_year)
}

/// True iff the article's label came from a human indexer without the
/// legacy tool ever scoring it: no BmCS result, and human-completed on or
/// before the cutoff date.
pub fn is_manual_labeled(article: &Article, max_processed_date: NaiveDate) -> bool {
    article.bmcs_result.is_none()
        && article
            .date_completed
            .map_or(false, |date| date <= max_processed_date)
}

/// True iff the legacy tool marked the article uncertain and a human
/// reviewed it on or before the cutoff date.
///
/// Mutually exclusive with [`is_manual_labeled`] by construction: one
/// requires `bmcs_result` to be unset, the other requires the uncertain
/// sentinel.
pub fn is_bmcs_manual_labeled(article: &Article, max_processed_date: NaiveDate) -> bool {
    article.bmcs_result == Some(BMCS_UNCERTAIN_RESULT)
        && article
            .bmcs_processed_date
            .map_or(false, |date| date <= max_processed_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bmcs_common::IndexingPeriod;

    fn article(journal: &str, pub_year: i32) -> Article {
        Article {
            pmid: 1,
            title: "t".to_string(),
            abstract_text: "a".to_string(),
            affiliations: String::new(),
            journal_nlmid: journal.to_string(),
            pub_year,
            date_completed: None,
            date_revised: None,
            is_indexed: true,
            ref_types: HashSet::new(),
            bmcs_processed_date: None,
            bmcs_result: None,
        }
    }

    fn period(nlm_id: &str, start_year: i32, end_year: Option<i32>) -> IndexingPeriod {
        IndexingPeriod {
            nlm_id: nlm_id.to_string(),
            citation_subset: "IM".to_string(),
            is_fully_indexed: false,
            start_year,
            end_year,
        }
    }

    #[test]
    fn test_selective_boundary_years_are_excluded() {
        let mut periods = IndexingPeriodMap::new();
        periods.insert(
            "0000001".to_string(),
            vec![period("0000001", 1978, Some(1990))],
        );

        assert!(is_selectively_indexed(&periods, &article("0000001", 1985)));
        assert!(is_selectively_indexed(&periods, &article("0000001", 1979)));
        assert!(!is_selectively_indexed(&periods, &article("0000001", 1978)));
        assert!(!is_selectively_indexed(&periods, &article("0000001", 1990)));
    }

    #[test]
    fn test_open_ended_period_has_no_upper_bound() {
        let mut periods = IndexingPeriodMap::new();
        periods.insert("0000001".to_string(), vec![period("0000001", 2000, None)]);

        assert!(is_selectively_indexed(&periods, &article("0000001", 2023)));
        assert!(!is_selectively_indexed(&periods, &article("0000001", 2000)));
    }

    #[test]
    fn test_unknown_journal_is_not_selective() {
        let periods = IndexingPeriodMap::new();
        assert!(!is_selectively_indexed(&periods, &article("0000009", 1985)));
    }

    #[test]
    fn test_any_period_of_a_journal_can_match() {
        let mut periods = IndexingPeriodMap::new();
        periods.insert(
            "0000001".to_string(),
            vec![
                period("0000001", 1970, Some(1980)),
                period("0000001", 1995, None),
            ],
        );
        assert!(is_selectively_indexed(&periods, &article("0000001", 1975)));
        assert!(is_selectively_indexed(&periods, &article("0000001", 2001)));
        assert!(!is_selectively_indexed(&periods, &article("0000001", 1985)));
    }

    #[test]
    fn test_excluded_ref_type_intersects_exclusion_set() {
        let excluded: HashSet<String> =
            ["RetractionOf".to_string(), "ErratumFor".to_string()]
                .into_iter()
                .collect();

        let mut a = article("0000001", 2017);
        assert!(!has_excluded_ref_type(&excluded, &a));

        a.ref_types.insert("CommentIn".to_string());
        assert!(!has_excluded_ref_type(&excluded, &a));

        a.ref_types.insert("ErratumFor".to_string());
        assert!(has_excluded_ref_type(&excluded, &a));
    }

    #[test]
    fn test_problematic_requires_journal_and_early_completion() {
        let noisy: HashSet<String> = ["0000007".to_string()].into_iter().collect();

        let mut a = article("0000007", 2010);
        a.date_completed = NaiveDate::from_ymd_opt(2013, 5, 1);
        assert!(is_problematic_article(&noisy, 2015, &a));

        a.date_completed = NaiveDate::from_ymd_opt(2015, 1, 1);
        assert!(!is_problematic_article(&noisy, 2015, &a));

        let mut other = article("0000001", 2010);
        other.date_completed = NaiveDate::from_ymd_opt(2013, 5, 1);
        assert!(!is_problematic_article(&noisy, 2015, &other));
    }

    #[test]
    fn test_problematic_falls_back_to_date_revised() {
        let noisy: HashSet<String> = ["0000007".to_string()].into_iter().collect();
        let mut a = article("0000007", 2010);
        a.date_revised = NaiveDate::from_ymd_opt(2012, 1, 1);
        assert!(is_problematic_article(&noisy, 2015, &a));

        a.date_revised = None;
        assert!(!is_problematic_article(&noisy, 2015, &a));
    }

    #[test]
    fn test_manual_label_predicates_are_mutually_exclusive() {
        let cutoff = NaiveDate::from_ymd_opt(2021, 3, 29).unwrap();

        let mut human = article("0000001", 2019);
        human.date_completed = NaiveDate::from_ymd_opt(2020, 1, 1);
        assert!(is_manual_labeled(&human, cutoff));
        assert!(!is_bmcs_manual_labeled(&human, cutoff));

        let mut uncertain = human.clone();
        uncertain.bmcs_result = Some(BMCS_UNCERTAIN_RESULT);
        uncertain.bmcs_processed_date = NaiveDate::from_ymd_opt(2020, 6, 1);
        assert!(!is_manual_labeled(&uncertain, cutoff));
        assert!(is_bmcs_manual_labeled(&uncertain, cutoff));
    }

    #[test]
    fn test_labels_after_cutoff_are_not_trusted() {
        let cutoff = NaiveDate::from_ymd_opt(2021, 3, 29).unwrap();

        let mut late = article("0000001", 2021);
        late.date_completed = NaiveDate::from_ymd_opt(2021, 4, 1);
        assert!(!is_manual_labeled(&late, cutoff));

        late.bmcs_result = Some(BMCS_UNCERTAIN_RESULT);
        late.bmcs_processed_date = NaiveDate::from_ymd_opt(2021, 4, 1);
        assert!(!is_bmcs_manual_labeled(&late, cutoff));
    }

    #[test]
    fn test_confident_bmcs_result_is_not_manual() {
        let cutoff = NaiveDate::from_ymd_opt(2021, 3, 29).unwrap();
        let mut a = article("0000001", 2019);
        a.date_completed = NaiveDate::from_ymd_opt(2020, 1, 1);
        a.bmcs_result = Some(1);
        a.bmcs_processed_date = NaiveDate::from_ymd_opt(2020, 1, 1);
        assert!(!is_manual_labeled(&a, cutoff));
        assert!(!is_bmcs_manual_labeled(&a, cutoff));
    }
}
