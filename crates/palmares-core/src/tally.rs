//! Vote tallying for the results page.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::model::{Candidate, Category, Vote};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateResult {
    pub candidate_id: String,
    pub name: String,
    pub image: String,
    pub votes: u64,
    /// Share of the category's votes, 0–100.
    pub percentage: f64,
    /// `percentage` as shown on the results page, e.g. `"33.3"`.
    pub percentage_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryResult {
    pub category_id: String,
    pub name: String,
    pub total_votes: u64,
    /// Sorted by votes descending, then name.
    pub results: Vec<CandidateResult>,
}

impl CategoryResult {
    /// The leading candidate, once at least one vote has been cast.
    pub fn leader(&self) -> Option<&CandidateResult> {
        if self.total_votes == 0 {
            return None;
        }
        self.results.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Results {
    pub total_votes: u64,
    pub unique_voters: u64,
    pub categories: Vec<CategoryResult>,
}

/// Tallies `votes` for every votable category, in category order.
///
/// Votes whose candidate does not belong to the vote's category are
/// ignored. The leadership prize is skipped.
pub fn tally(categories: &[Category], candidates: &[Candidate], votes: &[Vote]) -> Results {
    let mut counts: HashMap<(&str, &str), u64> = HashMap::new();
    for vote in votes {
        *counts
            .entry((vote.category_id.as_str(), vote.candidate_id.as_str()))
            .or_default() += 1;
    }

    let categories = categories
        .iter()
        .filter(|c| c.is_votable())
        .map(|category| {
            let mut results: Vec<CandidateResult> = candidates
                .iter()
                .filter(|c| c.category_id == category.id)
                .map(|c| CandidateResult {
                    candidate_id: c.id.clone(),
                    name: c.name.clone(),
                    image: c.image.clone(),
                    votes: counts
                        .get(&(category.id.as_str(), c.id.as_str()))
                        .copied()
                        .unwrap_or(0),
                    percentage: 0.0,
                    percentage_label: String::new(),
                })
                .collect();

            let total_votes: u64 = results.iter().map(|r| r.votes).sum();
            for r in &mut results {
                if total_votes > 0 {
                    r.percentage = r.votes as f64 / total_votes as f64 * 100.0;
                }
                r.percentage_label = format_percentage(r.percentage);
            }
            results.sort_by(|a, b| b.votes.cmp(&a.votes).then_with(|| a.name.cmp(&b.name)));

            CategoryResult {
                category_id: category.id.clone(),
                name: category.name.clone(),
                total_votes,
                results,
            }
        })
        .collect();

    let unique_voters = votes
        .iter()
        .map(|v| v.user_id.as_str())
        .collect::<HashSet<_>>()
        .len() as u64;

    Results {
        total_votes: votes.len() as u64,
        unique_voters,
        categories,
    }
}

/// Renders a percentage with one decimal place.
pub fn format_percentage(percentage: f64) -> String {
    format!("{percentage:.1}")
}
