//! Pipeline Regression Tests
//!
//! Exercises the full pipeline (classify → extract → synthesize → critique →
//! metrics) through the public Orchestrator API. Asserts on the documented
//! scenarios, determinism across runs, ID uniqueness and ordering, detail
//! attachment, and skip isolation.

use chrono::{Duration, TimeZone, Utc};
use feedback_triage::config::PipelineConfig;
use feedback_triage::{
    parse_records, Category, ExtractedDetails, FeedbackRecord, GroundTruth, Orchestrator,
    QualityVerdict, RuleSet, Urgency,
};
use std::collections::{HashMap, HashSet};

fn at(minute: i64) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap() + Duration::minutes(minute)
}

/// 50 labelled records cycling through every category, including hard cases.
fn labelled_batch() -> (Vec<FeedbackRecord>, GroundTruth) {
    let templates: [(&str, Option<u8>, Category); 10] = [
        ("App crashes when I open settings on my Pixel 7, Android 14", Some(1), Category::Bug),
        ("Login fails with an error after the update, version 2.4.0", Some(2), Category::Bug),
        ("Would love a dark mode option, please add it!", Some(5), Category::FeatureRequest),
        ("Please add CSV export, it would help our team a lot", Some(4), Category::FeatureRequest),
        ("Love this app, the design is beautiful and intuitive", Some(5), Category::Praise),
        ("Excellent support, thank you so much", None, Category::Praise),
        ("Terrible value, overpriced and I want a refund", Some(1), Category::Complaint),
        ("Worst subscription I have ever paid for, so disappointed", Some(1), Category::Complaint),
        ("Click here to claim free money at www.prizes.test", None, Category::Spam),
        ("Great app but it keeps freezing", Some(3), Category::Praise),
    ];

    let mut records = Vec::new();
    let mut truth = GroundTruth::new();
    for i in 0..50 {
        let (text, rating, label) = templates[i % templates.len()];
        let id = format!("rec-{i:03}");
        let record = if rating.is_none() && i % 2 == 0 {
            FeedbackRecord::email(&id, text, at(i as i64))
        } else {
            FeedbackRecord::review(&id, text, rating, at(i as i64))
        };
        truth.insert(id, label);
        records.push(record);
    }
    (records, truth)
}

#[test]
fn crash_report_scenario() {
    let mut orchestrator = Orchestrator::new().unwrap();
    let record = FeedbackRecord::review(
        "scenario-bug",
        "App crashes every time I try to open my profile page. iPhone 14, iOS 17.2, app version 3.2.1",
        Some(1),
        at(0),
    );
    let report = orchestrator.run(&[record], None);
    let outcome = &report.tickets[0];
    let ticket = &outcome.ticket;

    assert_eq!(ticket.ticket_id, "BUG-0001");
    assert_eq!(ticket.category, Category::Bug);
    assert_eq!(ticket.urgency, Urgency::Critical);
    let bug = ticket.details.bug().expect("bug ticket carries BugDetails");
    assert_eq!(bug.severity, Urgency::Critical);
    assert_eq!(bug.device.as_deref(), Some("iPhone 14"));
    assert_eq!(bug.os.as_deref(), Some("iOS 17.2"));
    assert_eq!(bug.app_version.as_deref(), Some("3.2.1"));
    assert!(ticket.title.starts_with("[Critical] "));
    assert_eq!(outcome.quality.verdict, QualityVerdict::Pass);
}

#[test]
fn dark_mode_request_scenario() {
    let mut orchestrator = Orchestrator::new().unwrap();
    let record = FeedbackRecord::review(
        "scenario-feature",
        "Would love a dark mode option, please add it!",
        Some(5),
        at(0),
    );
    let report = orchestrator.run(&[record], None);
    let ticket = &report.tickets[0].ticket;

    assert_eq!(ticket.ticket_id, "FEAT-0001");
    assert_eq!(ticket.category, Category::FeatureRequest);
    let feature = ticket.details.feature().expect("feature ticket carries FeatureDetails");
    assert_eq!(feature.theme, "dark mode");
    assert_eq!(ticket.urgency, feature.priority);
    assert!(ticket.title.starts_with(&format!("[{}] ", feature.priority)));
}

#[test]
fn empty_text_scenario() {
    let mut orchestrator = Orchestrator::new().unwrap();
    let report = orchestrator.run(&[FeedbackRecord::review("scenario-empty", "", None, at(0))], None);
    let outcome = &report.tickets[0];

    assert_eq!(outcome.ticket.category, Category::Spam);
    assert_eq!(outcome.ticket.confidence, 0.0);
    assert_eq!(outcome.ticket.reasoning, "empty content");
    assert_eq!(outcome.ticket.ticket_id, "SPAM-0001");
    assert!(outcome.quality.is_flagged(), "empty title and zero confidence are flagged");
}

#[test]
fn batch_evaluation_is_reproducible() {
    let (records, truth) = labelled_batch();

    let mut first = Orchestrator::new().unwrap();
    let mut second = Orchestrator::new().unwrap();
    let a = first.run(&records, Some(&truth));
    let b = second.run(&records, Some(&truth));
    // The same orchestrator re-run must also match
    let c = first.run(&records, Some(&truth));

    let eval_a = a.metrics.evaluation.as_ref().expect("ground truth supplied");
    assert_eq!(a.metrics.evaluation, b.metrics.evaluation);
    assert_eq!(a.metrics.evaluation, c.metrics.evaluation);
    assert_eq!(a.tickets, b.tickets);
    assert_eq!(a.tickets, c.tickets);

    assert_eq!(eval_a.total_labelled, 50);
    assert_eq!(eval_a.per_category.len(), 5);
    assert!(eval_a.accuracy > 0.5, "rules should get most of the batch right: {}", eval_a.accuracy);
    for (category, scores) in &eval_a.per_category {
        for value in [scores.precision, scores.recall, scores.f1] {
            assert!((0.0..=1.0).contains(&value), "{category} score out of range: {value}");
        }
    }
}

#[test]
fn ids_unique_and_increasing_per_category() {
    let (records, _) = labelled_batch();
    let report = Orchestrator::new().unwrap().run(&records, None);

    let ids: HashSet<&str> = report.tickets.iter().map(|o| o.ticket.ticket_id.as_str()).collect();
    assert_eq!(ids.len(), report.tickets.len(), "ticket ids must be unique");

    let mut last_seq: HashMap<Category, u32> = HashMap::new();
    for outcome in &report.tickets {
        let ticket = &outcome.ticket;
        let (_, seq) = ticket.ticket_id.rsplit_once('-').unwrap();
        assert_eq!(seq.len(), 4, "zero-padded to four digits: {}", ticket.ticket_id);
        let seq: u32 = seq.parse().unwrap();
        let expected = last_seq.get(&ticket.category).map_or(1, |s| s + 1);
        assert_eq!(seq, expected, "{} out of order", ticket.ticket_id);
        last_seq.insert(ticket.category, seq);
    }
}

#[test]
fn tickets_follow_input_order_and_invariants() {
    let (records, _) = labelled_batch();
    let report = Orchestrator::new().unwrap().run(&records, None);

    assert_eq!(report.tickets.len(), records.len());
    for (record, outcome) in records.iter().zip(&report.tickets) {
        let ticket = &outcome.ticket;
        assert_eq!(ticket.record_id, record.id);
        assert!((0.0..=1.0).contains(&ticket.confidence));
        assert!(ticket.details.matches_category(ticket.category));
        match ticket.category {
            Category::Bug => assert!(matches!(ticket.details, ExtractedDetails::Bug(_))),
            Category::FeatureRequest => assert!(matches!(ticket.details, ExtractedDetails::Feature(_))),
            _ => assert_eq!(ticket.details, ExtractedDetails::None),
        }
        assert_eq!(outcome.quality.ticket_id, ticket.ticket_id);
        assert_eq!(outcome.quality.is_flagged(), !outcome.quality.issues.is_empty());
    }

    let m = &report.metrics;
    assert_eq!(m.tickets_created, 50);
    assert_eq!(m.passed + m.flagged, 50);
    assert_eq!(m.category_counts.values().sum::<usize>(), 50);
    assert_eq!(m.urgency_counts.values().sum::<usize>(), 50);
}

#[test]
fn bad_records_are_skipped_without_stopping_the_batch() {
    let mut bad_email = FeedbackRecord::email("bad-email", "It crashed", at(1));
    bad_email.rating = Some(2);
    let records = vec![
        FeedbackRecord::review("ok-1", "The app crashed twice today", Some(1), at(0)),
        bad_email,
        FeedbackRecord::review("", "No id on this one", Some(3), at(2)),
        FeedbackRecord::review("bad-rating", "Love it", Some(7), at(3)),
        FeedbackRecord::review("ok-1", "Duplicate id", Some(5), at(4)),
        FeedbackRecord::review("ok-2", "Another crash on startup", Some(1), at(5)),
    ];
    let truth: GroundTruth = [("ok-1", Category::Bug), ("bad-email", Category::Bug)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

    let report = Orchestrator::new().unwrap().run(&records, Some(&truth));

    assert_eq!(report.tickets.len(), 2);
    assert_eq!(report.skipped.len(), 4);
    assert!(report.skipped.iter().all(|s| s.stage == "validate"));
    let ids: Vec<&str> = report.tickets.iter().map(|o| o.ticket.ticket_id.as_str()).collect();
    assert_eq!(ids, vec!["BUG-0001", "BUG-0002"]);

    let eval = report.metrics.evaluation.unwrap();
    assert_eq!(eval.total_labelled, 2);
    assert_eq!(eval.correct, 1);
    assert_eq!(eval.per_category[&Category::Bug].false_negatives, 1, "skipped label counts as a miss");
}

#[test]
fn sequential_config_matches_parallel_default() {
    let (records, truth) = labelled_batch();
    let mut config = PipelineConfig::default();
    config.pipeline.parallel_scoring = false;

    let parallel = Orchestrator::new().unwrap().run(&records, Some(&truth));
    let sequential = Orchestrator::with_rules(RuleSet::new(config).unwrap()).run(&records, Some(&truth));

    assert_eq!(parallel.tickets, sequential.tickets);
    assert_eq!(parallel.metrics.evaluation, sequential.metrics.evaluation);
    assert_eq!(parallel.metrics.urgency_counts, sequential.metrics.urgency_counts);
}

#[test]
fn report_serializes_with_boundary_field_names() {
    let mut orchestrator = Orchestrator::new().unwrap();
    let record = FeedbackRecord::review(
        "json-1",
        "App crashes every time I try to open my profile page. iPhone 14, iOS 17.2, app version 3.2.1",
        Some(1),
        at(0),
    );
    let report = orchestrator.run(&[record], None);
    let json = serde_json::to_value(&report).unwrap();

    let ticket = &json["tickets"][0]["ticket"];
    assert_eq!(ticket["ticketId"], "BUG-0001");
    assert_eq!(ticket["detailKind"], "Bug");
    assert_eq!(ticket["appVersion"], "3.2.1");
    assert_eq!(ticket["severity"], "Critical");
    assert_eq!(json["tickets"][0]["quality"]["verdict"], "Pass");
    assert!(json["metrics"]["categoryCounts"]["Bug"].is_number());

    let back: feedback_triage::BatchReport = serde_json::from_value(json).unwrap();
    assert_eq!(back.tickets, report.tickets);
}

#[test]
fn malformed_entries_are_reported_not_fatal() {
    let input = r#"[
        {"id": "ok-1", "source": "AppStoreReview", "text": "App crashes on launch", "rating": 1, "timestamp": "2024-06-01T08:00:00Z"},
        {"id": "bad-1", "source": "AppStoreReview", "text": "Great app", "rating": "five", "timestamp": "2024-06-01T08:01:00Z"}
    ]"#;
    let entries: Vec<serde_json::Value> = serde_json::from_str(input).unwrap();
    let (records, rejected) = parse_records(entries);
    let truth: GroundTruth = [("ok-1", Category::Bug), ("bad-1", Category::Praise)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

    let report = Orchestrator::new().unwrap().run_with_skipped(&records, rejected, Some(&truth));

    assert_eq!(report.tickets.len(), 1);
    assert_eq!(report.tickets[0].ticket.record_id, "ok-1");
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].record_id, "bad-1");
    assert_eq!(report.skipped[0].stage, "parse");
    assert_eq!(report.metrics.total_records, 2);
    assert_eq!(report.metrics.skipped, 1);
    let eval = report.metrics.evaluation.unwrap();
    assert_eq!(eval.per_category[&Category::Praise].false_negatives, 1);
}

#[test]
fn low_severity_bug_needs_review() {
    let record = FeedbackRecord::review(
        "typo-1",
        "There is a typo bug in the settings screen, please fix it",
        Some(2),
        at(0),
    );

    let shipped = Orchestrator::new().unwrap().run(std::slice::from_ref(&record), None);
    let outcome = &shipped.tickets[0];
    assert_eq!(outcome.ticket.category, Category::Bug);
    assert_eq!(outcome.ticket.urgency, Urgency::Medium, "typo sits in the Medium tier");
    assert_eq!(outcome.quality.verdict, QualityVerdict::Pass);

    let mut config = PipelineConfig::default();
    config.bug.severity_keywords.medium.retain(|k| k != "typo");
    config.bug.severity_keywords.low = vec!["typo".to_string()];
    let report = Orchestrator::with_rules(RuleSet::new(config).unwrap()).run(&[record], None);
    let outcome = &report.tickets[0];
    assert_eq!(outcome.ticket.urgency, Urgency::Low);
    assert!(outcome.quality.is_flagged());
    assert!(outcome.quality.issues[0].contains("Urgency Low unexpected for Bug"));
}
