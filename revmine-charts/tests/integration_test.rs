//! End-to-end tests for the chart data aggregation pipeline

use chrono::NaiveDate;
use revmine_charts::{
    bucket_records, select_top, CategorySet, CategorySource, ChartPipeline, ChartSeries, DateKey,
    DateWindow, PipelineConfig, RefreshCoordinator,
};
use revmine_common::records::{DailyStatistic, Review, TagKind, TagOccurrence};
use std::sync::Arc;

fn review(date: &str, sentiments: &[&str]) -> Review {
    Review {
        date: date.to_string(),
        app_id: Some("app-1".to_string()),
        app_name: Some("Notely".to_string()),
        sentiments: Some(sentiments.iter().map(|s| s.to_string()).collect()),
        features: None,
        descriptors: None,
        review_text: None,
    }
}

fn sample_reviews() -> Vec<Review> {
    vec![
        review("01/02/2024", &["happiness"]),
        review("01/02/2024", &["sadness"]),
        review("02/02/2024", &["happiness"]),
    ]
}

fn sentiment_pipeline(window: DateWindow) -> ChartPipeline {
    ChartPipeline::new(PipelineConfig {
        window,
        categories: CategorySource::Fixed(CategorySet::from_names(["happiness", "sadness"])),
        ..PipelineConfig::default()
    })
}

fn run_sentiments(pipeline: &mut ChartPipeline, reviews: &[Review]) -> ChartSeries {
    pipeline.run(
        reviews,
        |r: &Review| r.date.as_str(),
        |r: &Review| r.tags(TagKind::Sentiments),
    )
}

#[test]
fn unbounded_aggregation_matches_worked_example() {
    let mut pipeline = sentiment_pipeline(DateWindow::unbounded());
    let series = run_sentiments(&mut pipeline, &sample_reviews());

    assert_eq!(series.labels, vec!["2024-02-01", "2024-02-02"]);
    assert_eq!(series.datasets[0].label, "happiness");
    assert_eq!(series.datasets[0].data, vec![1, 1]);
    assert_eq!(series.datasets[1].label, "sadness");
    assert_eq!(series.datasets[1].data, vec![1, 0]);
}

#[test]
fn lower_bounded_window_excludes_earlier_days() {
    let window = DateWindow::since(NaiveDate::from_ymd_opt(2024, 2, 2).unwrap());
    let mut pipeline = sentiment_pipeline(window);
    let series = run_sentiments(&mut pipeline, &sample_reviews());

    assert_eq!(series.labels, vec!["2024-02-02"]);
    assert_eq!(series.datasets[0].data, vec![1]);
    assert_eq!(series.datasets[1].data, vec![0]);
}

#[test]
fn malformed_date_is_excluded_and_rest_aggregates() {
    let mut reviews = sample_reviews();
    reviews.push(review("13/13/2024", &["happiness"]));

    let mut pipeline = sentiment_pipeline(DateWindow::unbounded());
    let series = run_sentiments(&mut pipeline, &reviews);

    // Same result as without the bad record
    assert_eq!(series.labels, vec!["2024-02-01", "2024-02-02"]);
    assert_eq!(series.datasets[0].data, vec![1, 1]);
    assert_eq!(series.datasets[1].data, vec![1, 0]);
}

#[test]
fn conservation_law_holds() {
    let reviews = vec![
        review("01/02/2024", &["happiness", "sadness"]),
        review("05/02/2024", &["happiness"]),
        review("09/02/2024", &["happiness"]),
        review("09/02/2024", &["sadness"]),
    ];

    let mut pipeline = sentiment_pipeline(DateWindow::unbounded());
    let series = run_sentiments(&mut pipeline, &reviews);

    let tagged = |name: &str| -> u32 {
        reviews
            .iter()
            .filter(|r| r.sentiments.as_deref().unwrap().contains(&name.to_string()))
            .count() as u32
    };
    for dataset in &series.datasets {
        let sum: u32 = dataset.data.iter().sum();
        assert_eq!(sum, tagged(&dataset.label), "category {}", dataset.label);
    }
}

#[test]
fn rerunning_is_deterministic() {
    let mut first = sentiment_pipeline(DateWindow::unbounded());
    let mut second = sentiment_pipeline(DateWindow::unbounded());

    let a = run_sentiments(&mut first, &sample_reviews());
    let b = run_sentiments(&mut second, &sample_reviews());
    assert_eq!(a, b);

    let json_a = serde_json::to_string(&a).unwrap();
    let json_b = serde_json::to_string(&b).unwrap();
    assert_eq!(json_a, json_b);
}

#[test]
fn pre_aggregated_statistics_feed_the_same_pipeline() {
    let stats = vec![
        DailyStatistic {
            date: "2024-02-01".to_string(),
            app_id: Some("app-1".to_string()),
            app_name: Some("Notely".to_string()),
            sentiment_occurrences: vec![
                TagOccurrence {
                    name: "happiness".to_string(),
                    occurrences: 4,
                },
                TagOccurrence {
                    name: "sadness".to_string(),
                    occurrences: 2,
                },
            ],
            feature_occurrences: vec![],
        },
        DailyStatistic {
            date: "2024-02-02".to_string(),
            app_id: Some("app-1".to_string()),
            app_name: Some("Notely".to_string()),
            sentiment_occurrences: vec![TagOccurrence {
                name: "happiness".to_string(),
                occurrences: 1,
            }],
            feature_occurrences: vec![],
        },
    ];

    let mut pipeline = sentiment_pipeline(DateWindow::unbounded());
    let series = pipeline.run(
        &stats,
        |s: &DailyStatistic| s.date.as_str(),
        |s: &DailyStatistic| s.tags(TagKind::Sentiments),
    );

    assert_eq!(series.labels, vec!["2024-02-01", "2024-02-02"]);
    assert_eq!(series.datasets[0].data, vec![4, 1]);
    assert_eq!(series.datasets[1].data, vec![2, 0]);
}

#[test]
fn top_n_over_feature_totals() {
    let reviews = vec![
        Review {
            date: "01/02/2024".to_string(),
            app_id: None,
            app_name: None,
            sentiments: None,
            features: Some(vec![
                "a".to_string(),
                "b".to_string(),
                "c".to_string(),
                "d".to_string(),
            ]),
            descriptors: None,
            review_text: None,
        },
        Review {
            date: "02/02/2024".to_string(),
            app_id: None,
            app_name: None,
            sentiments: None,
            features: Some(vec!["a".to_string(), "b".to_string(), "c".to_string()]),
            descriptors: None,
            review_text: None,
        },
    ];

    let bucket = bucket_records(
        &reviews,
        &DateWindow::unbounded(),
        |r: &Review| r.date.as_str(),
        |r: &Review| r.tags(TagKind::Features),
    );
    let categories = CategorySet::from_names(["a", "b", "c", "d"]);
    let totals = bucket.totals(&categories);
    assert_eq!(
        totals,
        vec![
            ("a".to_string(), 2),
            ("b".to_string(), 2),
            ("c".to_string(), 2),
            ("d".to_string(), 1),
        ]
    );

    let top = select_top(&totals, 2, Some((1, 5)));
    assert_eq!(
        top,
        vec![("a".to_string(), 2), ("b".to_string(), 2)],
        "equal counts keep input order"
    );
}

#[test]
fn date_keys_sort_chronologically_as_strings() {
    let keys = vec![
        DateKey::parse("09/01/2024").unwrap(),
        DateKey::parse("2024-02-01").unwrap(),
        DateKey::parse("31/12/2023").unwrap(),
    ];
    let mut by_key = keys.clone();
    by_key.sort();

    let mut by_string: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
    by_string.sort();

    let from_keys: Vec<String> = by_key.iter().map(|k| k.to_string()).collect();
    assert_eq!(from_keys, by_string);
}

#[tokio::test]
async fn interleaved_refreshes_discard_the_stale_response() {
    let coordinator = Arc::new(RefreshCoordinator::new());
    let (older_may_finish_tx, older_may_finish_rx) = tokio::sync::oneshot::channel::<()>();

    // Older request starts first but finishes last
    let older_generation = coordinator.begin();
    let older = {
        let coordinator = Arc::clone(&coordinator);
        tokio::spawn(async move {
            older_may_finish_rx.await.unwrap();
            coordinator.commit(older_generation, "older response")
        })
    };

    // Newer request starts second and finishes first
    let newer_generation = coordinator.begin();
    let committed = coordinator.commit(newer_generation, "newer response");
    assert_eq!(committed, Some("newer response"));

    older_may_finish_tx.send(()).unwrap();
    let stale = older.await.unwrap();
    assert_eq!(stale, None, "stale response must not overwrite fresher state");
}
