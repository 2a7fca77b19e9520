use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    config::Config,
    db::{BookRepository, ReviewRepository},
    error::AppResult,
    models::{Book, BookId, Review},
};

/// Default number of books in a recommendation list
pub const TOP_N: usize = 5;

/// Default share of the median, in percent, that review volume can discount
pub const INFLUENCE_RATE: u32 = 20;

/// Default review count past which the volume factor shrinks
pub const VOLUME_CAP: usize = 10;

/// A book's score during ranking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedScore {
    pub book_id: BookId,
    pub value: f64,
}

/// Groups reviews by the book they reference
///
/// Every group in the result holds at least one review.
pub fn group_by_book(reviews: Vec<Review>) -> HashMap<BookId, Vec<Review>> {
    let mut groups: HashMap<BookId, Vec<Review>> = HashMap::new();
    for review in reviews {
        groups.entry(review.book_id).or_default().push(review);
    }
    groups
}

/// Statistical median of `ratings`
///
/// Even-sized inputs yield the mean of the two middle values. Returns `None`
/// for an empty slice.
pub fn median(ratings: &[i32]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }

    let mut sorted = ratings.to_vec();
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    let value = if sorted.len() % 2 == 0 {
        (f64::from(sorted[mid - 1]) + f64::from(sorted[mid])) / 2.0
    } else {
        f64::from(sorted[mid])
    };

    Some(value)
}

/// Median rating adjusted by review volume
///
/// ```text
/// base          = (100 - influence_rate) / 100
/// volume_factor = (1 - base) * volume_cap / max(review_count, volume_cap)
/// score         = median * (base + volume_factor)
/// ```
///
/// Counts at or below `volume_cap` all get the full multiplier of 1.0; above
/// it the multiplier decays towards `base`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scorer {
    influence_rate: u32,
    volume_cap: usize,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(INFLUENCE_RATE, VOLUME_CAP)
    }
}

impl Scorer {
    /// `influence_rate` is clamped to 100 percent and `volume_cap` to at least one review
    pub fn new(influence_rate: u32, volume_cap: usize) -> Self {
        Self {
            influence_rate: influence_rate.min(100),
            volume_cap: volume_cap.max(1),
        }
    }

    /// Multiplier applied to the median for a group of `review_count` reviews
    pub fn volume_multiplier(&self, review_count: usize) -> f64 {
        let base = f64::from(100 - self.influence_rate) / 100.0;
        let cap = self.volume_cap as f64;
        let volume_factor = (1.0 - base) * cap / review_count.max(self.volume_cap) as f64;
        base + volume_factor
    }

    /// Weighted score of one book's reviews; an empty group scores 0.0
    pub fn score(&self, group: &[Review]) -> f64 {
        let ratings: Vec<i32> = group.iter().map(|review| review.rating).collect();
        match median(&ratings) {
            Some(median) => median * self.volume_multiplier(ratings.len()),
            None => 0.0,
        }
    }

    /// Scores every group
    pub fn score_groups(&self, groups: &HashMap<BookId, Vec<Review>>) -> Vec<WeightedScore> {
        groups
            .iter()
            .map(|(book_id, group)| WeightedScore {
                book_id: *book_id,
                value: self.score(group),
            })
            .collect()
    }
}

/// Orders scores descending and keeps the first `limit` book ids
///
/// Equal scores are ordered by ascending book id.
pub fn rank(mut scores: Vec<WeightedScore>, limit: usize) -> Vec<BookId> {
    scores.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| a.book_id.cmp(&b.book_id))
    });
    scores.truncate(limit);
    scores.into_iter().map(|score| score.book_id).collect()
}

/// Tunables for the recommendation pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationSettings {
    pub limit: usize,
    pub scorer: Scorer,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            limit: TOP_N,
            scorer: Scorer::default(),
        }
    }
}

impl From<&Config> for RecommendationSettings {
    fn from(config: &Config) -> Self {
        Self {
            limit: config.recommendation_limit,
            scorer: Scorer::new(config.influence_rate, config.volume_cap),
        }
    }
}

/// Global top-rated book recommendations
///
/// Recomputed from the full review set on every call; nothing is cached.
pub struct RecommendationService {
    reviews: Arc<dyn ReviewRepository>,
    books: Arc<dyn BookRepository>,
    settings: RecommendationSettings,
}

impl RecommendationService {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        books: Arc<dyn BookRepository>,
        settings: RecommendationSettings,
    ) -> Self {
        Self {
            reviews,
            books,
            settings,
        }
    }

    /// Ids of the highest scoring books, best first
    pub async fn top_rated_book_ids(&self) -> AppResult<Vec<BookId>> {
        let reviews = self.reviews.find_all().await?;
        let review_count = reviews.len();

        let groups = group_by_book(reviews);
        let scores = self.settings.scorer.score_groups(&groups);
        let ranked = rank(scores, self.settings.limit);

        tracing::info!(
            review_count,
            book_count = groups.len(),
            ranked = ranked.len(),
            "Ranked books by weighted score"
        );

        Ok(ranked)
    }

    /// Book records for [`Self::top_rated_book_ids`], in ranking order
    ///
    /// Ranked ids with no matching book record are left out.
    pub async fn recommendations(&self) -> AppResult<Vec<Book>> {
        let ranked = self.top_rated_book_ids().await?;
        if ranked.is_empty() {
            return Ok(Vec::new());
        }

        let mut by_id: HashMap<BookId, Book> = self
            .books
            .find_by_ids(&ranked)
            .await?
            .into_iter()
            .map(|book| (book.id, book))
            .collect();

        let books: Vec<Book> = ranked
            .iter()
            .filter_map(|id| {
                let book = by_id.remove(id);
                if book.is_none() {
                    tracing::debug!(book_id = %id, "Ranked book has no catalog record");
                }
                book
            })
            .collect();

        Ok(books)
    }
}
