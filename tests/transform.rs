use chrono::{TimeZone, Utc};
use plane_to_linear::config::{IdentityMap, parse_identity_map};
use plane_to_linear::model::{COLUMNS, ColumnKind, SourceRecord, destination_headers};
use plane_to_linear::transform::{
    Diagnostic, format_legacy_timestamp, parse_legacy_timestamp, parse_timestamp,
    transform_record, transform_records,
};

fn row(fields: &[(&str, &str)]) -> SourceRecord {
    fields.iter().copied().collect()
}

fn date_columns() -> impl Iterator<Item = (&'static str, &'static str)> {
    COLUMNS
        .iter()
        .filter(|spec| spec.kind == ColumnKind::Timestamp)
        .map(|spec| (spec.source, spec.destination))
}

#[test]
fn column_table_matches_linear_layout() {
    let headers: Vec<&str> = destination_headers().collect();
    assert_eq!(
        headers,
        vec![
            "Title",
            "Description",
            "Status",
            "Started",
            "Due Date",
            "Priority",
            "Creator",
            "Assignee",
            "Labels",
            "Cycle Name",
            "Cycle Start",
            "Cycle End",
            "Created",
            "Updated",
            "Completed",
            "Archived",
            "Project",
        ]
    );

    let dates: Vec<&str> = date_columns().map(|(source, _)| source).collect();
    assert_eq!(
        dates,
        vec![
            "Start Date",
            "Target Date",
            "Cycle Start Date",
            "Cycle End Date",
            "Created At",
            "Updated At",
            "Completed At",
            "Archived At",
        ]
    );
}

#[test]
fn legacy_timestamp_is_rendered_in_utc() {
    let instant = Utc.with_ymd_and_hms(2023, 6, 15, 10, 30, 0).unwrap();
    assert_eq!(
        format_legacy_timestamp(&instant),
        "Thu Jun 15 2023 10:30:00 GMT+0000 (GMT)"
    );

    let early = Utc.with_ymd_and_hms(2024, 1, 5, 3, 4, 5).unwrap();
    assert_eq!(
        format_legacy_timestamp(&early),
        "Fri Jan 05 2024 03:04:05 GMT+0000 (GMT)"
    );

    let ancient = Utc.with_ymd_and_hms(999, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(
        format_legacy_timestamp(&ancient),
        "Tue Jan 01 999 00:00:00 GMT+0000 (GMT)"
    );
}

#[test]
fn legacy_timestamp_parses_back() {
    let instant = Utc.with_ymd_and_hms(2023, 6, 15, 10, 30, 0).unwrap();
    let rendered = format_legacy_timestamp(&instant);
    assert_eq!(parse_legacy_timestamp(&rendered), Some(instant));
    assert_eq!(parse_legacy_timestamp("yesterday"), None);
}

#[test]
fn accepts_common_export_date_shapes() {
    let expected = Utc.with_ymd_and_hms(2023, 6, 15, 10, 30, 0).unwrap();
    for value in [
        "2023-06-15T10:30:00Z",
        "2023-06-15T10:30:00.000Z",
        "2023-06-15T12:30:00+02:00",
        "2023-06-15T10:30:00",
        "2023-06-15 10:30:00",
        "2023-06-15 10:30:00+00:00",
        "Thu, 15 Jun 2023 10:30:00 +0000",
        "Thu Jun 15 2023 10:30:00 GMT+0000 (GMT)",
    ] {
        assert_eq!(parse_timestamp(value), Some(expected), "{value}");
    }

    assert_eq!(
        parse_timestamp("2023-06-15"),
        Some(Utc.with_ymd_and_hms(2023, 6, 15, 0, 0, 0).unwrap())
    );
    assert_eq!(
        parse_timestamp("2023-06-15T10:30Z"),
        Some(Utc.with_ymd_and_hms(2023, 6, 15, 10, 30, 0).unwrap())
    );
    assert_eq!(
        parse_timestamp("2023-06-15T12:30+02:00"),
        Some(Utc.with_ymd_and_hms(2023, 6, 15, 10, 30, 0).unwrap())
    );
    assert_eq!(
        parse_timestamp("2023-06"),
        Some(Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(
        parse_timestamp("2023"),
        Some(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(parse_timestamp("2023-13"), None);
    assert_eq!(parse_timestamp("202"), None);
    assert_eq!(parse_timestamp("not-a-date"), None);
    assert_eq!(parse_timestamp("   "), None);
}

#[test]
fn valid_dates_are_reformatted_in_every_date_column() {
    for (source, destination) in date_columns() {
        let transformed = transform_record(
            &row(&[(source, "2023-06-15T10:30:00Z")]),
            &IdentityMap::new(),
        );
        assert_eq!(
            transformed.record.get(destination),
            Some("Thu Jun 15 2023 10:30:00 GMT+0000 (GMT)"),
            "{source}"
        );
        assert!(transformed.diagnostics.is_empty());
    }
}

#[test]
fn empty_or_missing_dates_become_empty_without_warning() {
    for (source, destination) in date_columns() {
        for record in [row(&[]), row(&[(source, "")]), row(&[(source, "  ")])] {
            let transformed = transform_record(&record, &IdentityMap::new());
            assert_eq!(transformed.record.get(destination), Some(""));
            assert!(transformed.diagnostics.is_empty());
        }
    }
}

#[test]
fn unparseable_dates_become_empty_with_warning() {
    let source = row(&[("Name", "Broken"), ("Target Date", "not-a-date")]);
    let transformed = transform_record(&source, &IdentityMap::new());

    assert_eq!(transformed.record.get("Due Date"), Some(""));
    assert_eq!(
        transformed.diagnostics,
        vec![Diagnostic::InvalidDate {
            field: "Target Date",
            value: "not-a-date".to_string(),
            row: source.to_json(),
        }]
    );

    let message = transformed.diagnostics[0].to_string();
    assert!(message.contains("Target Date"));
    assert!(message.contains("not-a-date"));
    assert!(message.contains("\"Name\":\"Broken\""));
}

#[test]
fn assignee_and_creator_are_resolved_through_identity_map() {
    let identities: IdentityMap = [("alice", "alice@co.com")].into_iter().collect();

    let mapped = transform_record(
        &row(&[("Assignee", "alice"), ("Created By", "alice")]),
        &identities,
    );
    assert_eq!(mapped.record.get("Assignee"), Some("alice@co.com"));
    assert_eq!(mapped.record.get("Creator"), Some("alice@co.com"));

    let unmapped = transform_record(&row(&[("Assignee", "bob")]), &identities);
    assert_eq!(unmapped.record.get("Assignee"), Some("bob"));
    assert_eq!(unmapped.record.get("Creator"), Some(""));
}

#[test]
fn empty_email_mapping_keeps_the_identifier() {
    let identities: IdentityMap = [("alice", "")].into_iter().collect();
    assert_eq!(identities.resolve("alice"), "alice");

    let transformed = transform_record(&row(&[("Assignee", "alice")]), &identities);
    assert_eq!(transformed.record.get("Assignee"), Some("alice"));
}

#[test]
fn identity_map_only_applies_to_user_columns() {
    let identities: IdentityMap = [("alice", "alice@co.com")].into_iter().collect();
    let transformed = transform_record(
        &row(&[("Name", "alice"), ("Labels", "alice")]),
        &identities,
    );
    assert_eq!(transformed.record.get("Title"), Some("alice"));
    assert_eq!(transformed.record.get("Labels"), Some("alice"));
}

#[test]
fn text_columns_pass_through_verbatim() {
    let source = row(&[
        ("Name", "  Fix login, then \"ship\"  "),
        ("Description", "line one\nline two"),
        ("State", "In Progress"),
        ("Priority", "urgent"),
        ("Project", "not-a-date"),
        ("Unrelated", "ignored"),
    ]);
    let transformed = transform_record(&source, &IdentityMap::new());

    assert_eq!(
        transformed.record.get("Title"),
        Some("  Fix login, then \"ship\"  ")
    );
    assert_eq!(transformed.record.get("Description"), Some("line one\nline two"));
    assert_eq!(transformed.record.get("Status"), Some("In Progress"));
    assert_eq!(transformed.record.get("Priority"), Some("urgent"));
    assert_eq!(transformed.record.get("Project"), Some("not-a-date"));
    assert_eq!(transformed.record.cells().len(), COLUMNS.len());
    assert!(transformed.diagnostics.is_empty());
}

#[test]
fn completed_before_created_is_cleared() {
    let source = row(&[
        ("Created At", "2023-01-02T00:00:00Z"),
        ("Completed At", "2023-01-01T00:00:00Z"),
    ]);
    let transformed = transform_record(&source, &IdentityMap::new());

    assert_eq!(
        transformed.record.get("Created"),
        Some("Mon Jan 02 2023 00:00:00 GMT+0000 (GMT)")
    );
    assert_eq!(transformed.record.get("Completed"), Some(""));
    assert_eq!(
        transformed.diagnostics,
        vec![Diagnostic::CompletedBeforeCreated {
            created: "Mon Jan 02 2023 00:00:00 GMT+0000 (GMT)".to_string(),
            completed: "Sun Jan 01 2023 00:00:00 GMT+0000 (GMT)".to_string(),
            row: source.to_json(),
        }]
    );
}

#[test]
fn completed_after_or_at_created_is_kept() {
    for completed in ["2023-01-03T00:00:00Z", "2023-01-02T00:00:00Z"] {
        let transformed = transform_record(
            &row(&[
                ("Created At", "2023-01-02T00:00:00Z"),
                ("Completed At", completed),
            ]),
            &IdentityMap::new(),
        );
        assert_ne!(transformed.record.get("Completed"), Some(""));
        assert!(transformed.diagnostics.is_empty());
    }
}

#[test]
fn ordering_check_needs_both_dates() {
    let transformed = transform_record(
        &row(&[
            ("Created At", "garbage"),
            ("Completed At", "2023-01-01T00:00:00Z"),
        ]),
        &IdentityMap::new(),
    );
    assert_eq!(transformed.record.get("Created"), Some(""));
    assert_eq!(
        transformed.record.get("Completed"),
        Some("Sun Jan 01 2023 00:00:00 GMT+0000 (GMT)")
    );
    assert_eq!(transformed.diagnostics.len(), 1);
    assert!(matches!(
        transformed.diagnostics[0],
        Diagnostic::InvalidDate { field: "Created At", .. }
    ));
}

#[test]
fn batch_transform_keeps_row_count_and_order() {
    let sources: Vec<SourceRecord> = (0..5)
        .map(|index| row(&[("Name", format!("task {index}").as_str())]))
        .collect();
    let transformed = transform_records(&sources, &IdentityMap::new());

    assert_eq!(transformed.len(), sources.len());
    for (index, item) in transformed.iter().enumerate() {
        assert_eq!(item.record.get("Title"), Some(format!("task {index}").as_str()));
    }
}

#[test]
fn text_fields_survive_a_second_pass() {
    let identities: IdentityMap = [("alice", "alice@co.com")].into_iter().collect();
    let first = transform_record(
        &row(&[
            ("Name", "Task"),
            ("Description", "a, b"),
            ("State", "Done"),
            ("Labels", "bug;ui"),
            ("Project", "Web"),
        ]),
        &identities,
    );

    let aliased: SourceRecord = COLUMNS
        .iter()
        .zip(first.record.cells())
        .map(|(spec, value)| (spec.source, value.as_str()))
        .collect();
    let second = transform_record(&aliased, &identities);

    for spec in COLUMNS.iter().filter(|spec| spec.kind == ColumnKind::Text) {
        assert_eq!(
            first.record.get(spec.destination),
            second.record.get(spec.destination),
            "{}",
            spec.destination
        );
    }
}

#[test]
fn config_parsing_handles_missing_users_and_rejects_garbage() {
    let parsed = parse_identity_map(r#"{"users": {"alice": "alice@co.com"}}"#).unwrap();
    assert_eq!(parsed.resolve("alice"), "alice@co.com");
    assert_eq!(parsed.len(), 1);

    assert!(parse_identity_map("{}").unwrap().is_empty());
    assert!(parse_identity_map(r#"{"users": }"#).is_err());
    assert!(parse_identity_map(r#"{"users": {"alice": 3}}"#).is_err());
}
