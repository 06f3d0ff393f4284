//! Search, category filter and sorting over a meme list.
//!
//! The pipeline runs search first, then the category, then the sort key.
//! Sorting is stable, so memes with equal keys keep the order the category
//! step left them in.

use crate::models::Meme;
use rand::seq::SliceRandom;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    /// Catalog order, which the catalog already ranks by engagement
    #[default]
    Trending,
    /// Reverse of fetch order
    New,
    /// Landscape memes only
    Classic,
    /// Unseeded shuffle
    Random,
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Trending => "Trending",
            Category::New => "New",
            Category::Classic => "Classic",
            Category::Random => "Random",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trending" => Some(Category::Trending),
            "new" => Some(Category::New),
            "classic" => Some(Category::Classic),
            "random" => Some(Category::Random),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Likes,
    Date,
    Comments,
}

impl SortKey {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "likes" => Some(SortKey::Likes),
            "date" => Some(SortKey::Date),
            "comments" => Some(SortKey::Comments),
            _ => None,
        }
    }

    /// Label shown next to the sort selector
    pub fn display_name(&self) -> &str {
        match self {
            SortKey::Likes => "Most Liked",
            SortKey::Date => "Latest",
            SortKey::Comments => "Most Comments",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Descending,
    Ascending,
}

/// Engagement numbers of one meme, supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemeStats {
    pub likes: u64,
    pub comments: u64,
    /// Epoch milliseconds; 0 when unknown
    pub posted_at: i64,
}

impl MemeStats {
    fn key(&self, sort: SortKey) -> i64 {
        match sort {
            SortKey::Likes => i64::try_from(self.likes).unwrap_or(i64::MAX),
            SortKey::Date => self.posted_at,
            SortKey::Comments => i64::try_from(self.comments).unwrap_or(i64::MAX),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExploreQuery {
    pub search: String,
    pub category: Category,
    pub sort: SortKey,
    pub direction: SortDirection,
}

/// Applies `query` to `memes`, looking engagement up through `stats`
pub fn explore<'a, F>(memes: &'a [Meme], query: &ExploreQuery, stats: F) -> Vec<&'a Meme>
where
    F: Fn(&Meme) -> MemeStats,
{
    let mut selected: Vec<&Meme> = memes
        .iter()
        .filter(|meme| meme.matches_search(&query.search))
        .collect();

    match query.category {
        Category::Trending => {}
        Category::New => selected.reverse(),
        Category::Classic => selected.retain(|meme| meme.is_landscape()),
        Category::Random => selected.shuffle(&mut rand::rng()),
    }

    let mut keyed: Vec<(i64, &Meme)> = selected
        .into_iter()
        .map(|meme| (stats(meme).key(query.sort), meme))
        .collect();

    match query.direction {
        SortDirection::Descending => keyed.sort_by(|a, b| b.0.cmp(&a.0)),
        SortDirection::Ascending => keyed.sort_by(|a, b| a.0.cmp(&b.0)),
    }

    keyed.into_iter().map(|(_, meme)| meme).collect()
}

/// Top `limit` memes by like count, ties in list order
pub fn leaderboard<'a, F>(memes: &'a [Meme], likes: F, limit: usize) -> Vec<&'a Meme>
where
    F: Fn(&Meme) -> u64,
{
    let mut ranked: Vec<(u64, &Meme)> = memes.iter().map(|meme| (likes(meme), meme)).collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0));
    ranked.into_iter().take(limit).map(|(_, meme)| meme).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn ids(memes: &[&Meme]) -> Vec<String> {
        memes.iter().map(|m| m.id.clone()).collect()
    }

    fn likes_from(table: &[(&str, u64)]) -> impl Fn(&Meme) -> MemeStats {
        let table: HashMap<String, u64> =
            table.iter().map(|(id, l)| (id.to_string(), *l)).collect();
        move |meme: &Meme| MemeStats {
            likes: table.get(&meme.id).copied().unwrap_or(0),
            ..MemeStats::default()
        }
    }

    fn sample() -> Vec<Meme> {
        vec![
            Meme::new("1", "u", "Doge").with_dimensions(800, 600),
            Meme::new("2", "u", "Grumpy Cat").with_dimensions(500, 700),
            Meme::new("3", "u", "CATS RULE").with_dimensions(900, 300),
            Meme::new("4", "u", "Distracted Boyfriend"),
        ]
    }

    #[test]
    fn test_sort_by_likes_descending() {
        let memes = vec![Meme::new("1", "u", "Doge"), Meme::new("2", "u", "Cat")];
        let query = ExploreQuery::default();

        let result = explore(&memes, &query, likes_from(&[("1", 10), ("2", 20)]));
        assert_eq!(ids(&result), vec!["2", "1"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let memes = sample();
        let query = ExploreQuery::default();

        let result = explore(&memes, &query, likes_from(&[("3", 5)]));
        assert_eq!(ids(&result), vec!["3", "1", "2", "4"]);

        let query = ExploreQuery {
            direction: SortDirection::Ascending,
            ..ExploreQuery::default()
        };
        let result = explore(&memes, &query, likes_from(&[("3", 5)]));
        assert_eq!(ids(&result), vec!["1", "2", "4", "3"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let memes = sample();
        let query = ExploreQuery {
            search: "cat".to_string(),
            ..ExploreQuery::default()
        };

        let result = explore(&memes, &query, |_| MemeStats::default());
        assert_eq!(ids(&result), vec!["2", "3"]);
    }

    #[test]
    fn test_categories() {
        let memes = sample();
        let flat = |_: &Meme| MemeStats::default();

        let mut query = ExploreQuery::default();
        assert_eq!(ids(&explore(&memes, &query, flat)), vec!["1", "2", "3", "4"]);

        query.category = Category::New;
        assert_eq!(ids(&explore(&memes, &query, flat)), vec!["4", "3", "2", "1"]);

        query.category = Category::Classic;
        assert_eq!(ids(&explore(&memes, &query, flat)), vec!["1", "3"]);
    }

    #[test]
    fn test_search_runs_before_category() {
        let memes = sample();
        let query = ExploreQuery {
            search: "cat".to_string(),
            category: Category::Classic,
            ..ExploreQuery::default()
        };
        let result = explore(&memes, &query, |_| MemeStats::default());
        assert_eq!(ids(&result), vec!["3"]);
    }

    #[test]
    fn test_random_is_a_permutation() {
        let memes = sample();
        let query = ExploreQuery {
            category: Category::Random,
            ..ExploreQuery::default()
        };

        let mut result = ids(&explore(&memes, &query, |_| MemeStats::default()));
        result.sort();
        assert_eq!(result, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_sort_by_date_and_comments() {
        let memes = sample();
        let stats = |meme: &Meme| MemeStats {
            likes: 0,
            comments: if meme.id == "2" { 3 } else { 0 },
            posted_at: meme.id.parse::<i64>().unwrap_or(0),
        };

        let query = ExploreQuery {
            sort: SortKey::Date,
            ..ExploreQuery::default()
        };
        assert_eq!(ids(&explore(&memes, &query, stats)), vec!["4", "3", "2", "1"]);

        let query = ExploreQuery {
            sort: SortKey::Comments,
            ..ExploreQuery::default()
        };
        assert_eq!(ids(&explore(&memes, &query, stats)), vec!["2", "1", "3", "4"]);
    }

    #[test]
    fn test_leaderboard() {
        let memes = sample();
        let liked = |meme: &Meme| u64::from(meme.id == "3" || meme.id == "4");

        let top = leaderboard(&memes, liked, 3);
        assert_eq!(ids(&top), vec!["3", "4", "1"]);
    }

    #[test]
    fn test_parse_options() {
        assert_eq!(Category::from_str("classic"), Some(Category::Classic));
        assert_eq!(Category::from_str("Hot"), None);
        assert_eq!(SortKey::from_str("Comments"), Some(SortKey::Comments));
        assert_eq!(SortKey::Date.display_name(), "Latest");
    }
}
