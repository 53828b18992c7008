//! Criterion benchmarks for the recommender.
//!
//! Measures end-to-end recommendation time across candidate list sizes
//! (50, 200, 1000) under a cold rainy observation.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package menucast-scorer
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::sync::Arc;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use menucast_core::test_support::{candidate, sample_reference};
use menucast_core::{
    Candidate, PrecipitationType, Recommend, RecommendationRequest, UserPreference,
    WeatherObservation,
};
use menucast_scorer::Recommender;

/// Candidate list sizes to benchmark.
const LIST_SIZES: &[usize] = &[50, 200, 1000];

/// Category strings cycled through when generating candidates.
const CATEGORIES: [&str; 6] = [
    "Restaurant > Korean > Soup",
    "Restaurant > Western > Salad",
    "Restaurant > Seafood",
    "Restaurant > Snack",
    "Cafe",
    "Shop > Stationery",
];

/// Build `count` candidates with repeating categories and spread distances.
fn generate_candidates(count: usize) -> Vec<Candidate> {
    (0..count)
        .zip(1u64..)
        .map(|(index, id)| {
            #[expect(
                clippy::integer_division_remainder_used,
                reason = "Modulo for cyclic assignment is intentional"
            )]
            let category = CATEGORIES
                .get(index % CATEGORIES.len())
                .copied()
                .unwrap_or("Cafe");
            let step = u32::try_from(id % 37).unwrap_or_default();
            #[expect(clippy::float_arithmetic, reason = "Distances step by 90 m")]
            let distance = f64::from(step) * 90.0;
            candidate(id, category, distance)
        })
        .collect()
}

fn build_request(count: usize) -> RecommendationRequest {
    RecommendationRequest {
        candidates: generate_candidates(count),
        weather: WeatherObservation::new(4.0)
            .with_humidity(88.0)
            .with_wind(5.0)
            .with_precipitation(PrecipitationType::Rain, 6.0),
        preferences: UserPreference::new()
            .with_allergy("shellfish")
            .with_dislike("dessert"),
        origin: None,
    }
}

fn bench_recommend(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend");
    group.measurement_time(Duration::from_secs(5));

    let recommender = Recommender::new(Arc::new(sample_reference()));
    for &size in LIST_SIZES {
        let request = build_request(size);

        #[expect(
            clippy::as_conversions,
            reason = "Safe conversion for small list sizes"
        )]
        let throughput_size = size as u64;
        group.throughput(Throughput::Elements(throughput_size));
        group.bench_with_input(BenchmarkId::new("candidates", size), &size, |b, _| {
            b.iter(|| recommender.recommend(&request));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_recommend);
criterion_main!(benches);
