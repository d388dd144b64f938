//! Quiz question set
//!
//! Sixteen fixed four-option questions. Option values are the answer weights
//! 1..=4 in listed order. The served order is a seeded permutation; the seed
//! comes from live headline text so the order drifts over time.

use crate::types::NewsSource;
use futures::future::join_all;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Number of options per question
pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub label: String,
    pub value: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: Vec<QuizOption>,
}

fn question(id: &str, text: &str, options: [&str; OPTIONS_PER_QUESTION]) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
        options: options
            .iter()
            .zip(1u8..)
            .map(|(label, value)| QuizOption {
                label: label.to_string(),
                value,
            })
            .collect(),
    }
}

/// The fixed question bank, in canonical order
pub fn question_bank() -> Vec<Question> {
    vec![
        question(
            "luxury-brand",
            "Which luxury brand do you gravitate toward for special occasions?",
            [
                "I do not focus on brands",
                "Zara / Mango",
                "Michael Kors / Coach",
                "Louis Vuitton / Dior / Gucci",
            ],
        ),
        question(
            "dining",
            "Your dining habit on a typical weekend in Lagos or Abuja:",
            [
                "Cook at home or eat local spots",
                "Casual chain restaurants",
                "Upscale lounges occasionally",
                "Fine dining reservations and chef pop-ups",
            ],
        ),
        question(
            "travel",
            "Your travel pattern over the last 12 months:",
            [
                "No travel",
                "Domestic trips",
                "One international trip",
                "Multiple international trips in premium cabins",
            ],
        ),
        question(
            "social-media",
            "How do you use Instagram/X for lifestyle content?",
            [
                "Rarely post",
                "Follow a few creators",
                "Active with curated feed",
                "Create/engage with luxury and culture communities",
            ],
        ),
        question(
            "arts-culture",
            "Cultural activities you prioritize:",
            [
                "TV or YouTube at home",
                "Occasional cinema or concerts",
                "Art exhibitions and theatre once in a while",
                "VIP art shows, gallery openings, film festivals",
            ],
        ),
        question(
            "fashion-spend",
            "Monthly fashion and grooming spend range:",
            ["Under ₦30k", "₦30k–₦100k", "₦100k–₦300k", "₦300k+"],
        ),
        question(
            "real-estate",
            "Aspirational home preference:",
            [
                "Practical apartment",
                "Gated community starter home",
                "High-rise serviced apartment",
                "Waterfront penthouse or Ikoyi old-money mansion aesthetic",
            ],
        ),
        question(
            "events",
            "Your social calendar typically includes:",
            [
                "Family and small gatherings",
                "Occasional club nights",
                "Branded launch events",
                "Exclusive invite-only galas and premieres",
            ],
        ),
        question(
            "fitness-wellness",
            "Wellness routine you keep:",
            [
                "Walks/home workouts",
                "Regular gym",
                "Personal trainer or boutique classes",
                "Private clubs with spa and recovery",
            ],
        ),
        question(
            "tech-gadgets",
            "Your device ecosystem:",
            [
                "Whatever works",
                "Mid-range Android",
                "Latest iPhone or flagship Android",
                "Multiple devices incl. luxury accessories (Apple Watch Ultra, AirPods Max)",
            ],
        ),
        question(
            "transport",
            "Primary transport style:",
            [
                "Public/ride-hailing",
                "Used compact car",
                "New compact SUV or sedan",
                "Chauffeur-driven or luxury SUV",
            ],
        ),
        question(
            "dining-knowledge",
            "Chef and restaurant awareness (NG/Global):",
            [
                "Not into it",
                "A few popular names",
                "Track top Lagos spots and a few Michelin chefs",
                "Deep knowledge of Michelin lists and Chef's Table names",
            ],
        ),
        question(
            "finance",
            "Approach to saving and investing:",
            [
                "Basic savings",
                "Mutual funds/treasury bills",
                "Stock/crypto allocation",
                "Private equity/venture and real estate syndicates",
            ],
        ),
        question(
            "philanthropy",
            "Giving and impact activities:",
            [
                "Ad-hoc donations",
                "Regular small support",
                "Structured causes yearly",
                "Foundation work and patron circles",
            ],
        ),
        question(
            "network",
            "Professional/social network:",
            [
                "Tight circle",
                "Local industry groups",
                "Regional ecosystems",
                "International networks and clubs",
            ],
        ),
        question(
            "taste",
            "Interior and lifestyle taste profile:",
            [
                "Functional",
                "Trendy essentials",
                "Curated contemporary",
                "Timeless, bespoke, collector-grade pieces",
            ],
        ),
    ]
}

/// Deterministic shuffle of `questions` for `seed`
pub fn permute(mut questions: Vec<Question>, seed: u64) -> Vec<Question> {
    let mut rng = StdRng::seed_from_u64(seed);
    questions.shuffle(&mut rng);
    questions
}

/// Seed derived from headline text: total character count
pub fn seed_from_headlines(headlines: &[String]) -> u64 {
    headlines.iter().map(|h| h.chars().count() as u64).sum()
}

/// Collect up to `per_feed` titles from each query's feed
///
/// Feeds are fetched concurrently; a failed feed contributes no titles.
pub async fn fetch_headlines(
    news: &dyn NewsSource,
    queries: &[String],
    per_feed: usize,
) -> Vec<String> {
    let feeds = join_all(queries.iter().map(|query| news.search(query))).await;

    let mut headlines = Vec::new();
    for (query, feed) in queries.iter().zip(feeds) {
        match feed {
            Ok(feed) => headlines.extend(
                feed.items
                    .into_iter()
                    .take(per_feed)
                    .filter_map(|item| item.title),
            ),
            Err(e) => warn!(query = %query, error = %e, "Headline feed unavailable"),
        }
    }
    headlines
}

/// Question bank in headline-seeded order
///
/// Without any headline text the current time seeds the permutation.
pub async fn produce_questions(
    news: &dyn NewsSource,
    queries: &[String],
    per_feed: usize,
) -> Vec<Question> {
    let headlines = fetch_headlines(news, queries, per_feed).await;
    let seed = match seed_from_headlines(&headlines) {
        0 => chrono::Utc::now().timestamp_millis().unsigned_abs(),
        seed => seed,
    };

    debug!(headlines = headlines.len(), seed, "Ordering question set");

    permute(question_bank(), seed)
}
