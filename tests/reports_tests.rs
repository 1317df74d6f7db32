// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finboard::error::{ApiError, StorageError};
use finboard::models::{NewReport, Report};
use finboard::reports::{
    ObjectStore, ReportBackend, ReportList, content_type_for, mock_url, object_key, upload,
};
use std::cell::RefCell;

fn report(id: i64) -> Report {
    Report {
        id,
        name: format!("Report {}", id),
        report_type: Some("monthly-summary".into()),
        url: format!("https://files.example/{}.pdf", id),
        format: Some("pdf".into()),
        created_at: None,
    }
}

#[derive(Default)]
struct FakeBackend {
    deleted: RefCell<Vec<i64>>,
    refuse: bool,
}

impl ReportBackend for FakeBackend {
    fn list(&self, _user_id: i64) -> Result<Vec<Report>, ApiError> {
        Ok((1..=4).map(report).collect())
    }

    fn register(&self, r: &NewReport) -> Result<Report, ApiError> {
        Ok(Report {
            id: 10,
            name: r.name.clone(),
            report_type: Some(r.report_type.clone()),
            url: r.url.clone(),
            format: Some(r.format.clone()),
            created_at: None,
        })
    }

    fn delete(&self, id: i64) -> Result<(), ApiError> {
        if self.refuse {
            return Err(ApiError::from_status(403, r#"{"message":"not yours"}"#));
        }
        self.deleted.borrow_mut().push(id);
        Ok(())
    }
}

#[test]
fn remove_drops_exactly_one_id() {
    let mut list = ReportList::new((1..=4).map(report).collect());
    let removed = list.remove(3).unwrap();
    assert_eq!(removed.id, 3);
    let ids: Vec<i64> = list.reports().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 4]);
    assert!(list.remove(3).is_none());
    assert_eq!(list.reports().len(), 3);
}

#[test]
fn delete_goes_to_backend_then_filters() {
    let backend = FakeBackend::default();
    let mut list = ReportList::fetch(&backend, 5).unwrap();
    let gone = list.delete(&backend, 2).unwrap();
    assert_eq!(gone.map(|r| r.id), Some(2));
    assert_eq!(backend.deleted.borrow().as_slice(), [2]);
    assert!(list.find(2).is_none());
    assert!(list.find(1).is_some() && list.find(3).is_some() && list.find(4).is_some());
}

#[test]
fn failed_backend_delete_keeps_list() {
    let backend = FakeBackend {
        refuse: true,
        ..Default::default()
    };
    let mut list = ReportList::fetch(&backend, 5).unwrap();
    let err = list.delete(&backend, 2).unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(ref m) if m == "not yours"));
    assert_eq!(list.reports().len(), 4);
}

struct RecordingStore {
    puts: RefCell<Vec<(String, usize, String)>>,
}

impl ObjectStore for RecordingStore {
    fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, StorageError> {
        self.puts
            .borrow_mut()
            .push((key.to_string(), bytes.len(), content_type.to_string()));
        Ok(format!("https://bucket.example/{}", key))
    }
}

#[test]
fn upload_uses_store_under_user_prefix() {
    let store = RecordingStore {
        puts: RefCell::new(Vec::new()),
    };
    let out = upload(Some(&store), 42, "march.pdf", vec![1, 2, 3], "application/pdf").unwrap();
    assert!(!out.mocked);
    assert_eq!(out.key, "reports/user_42/march.pdf");
    assert_eq!(out.url, "https://bucket.example/reports/user_42/march.pdf");
    assert_eq!(
        store.puts.borrow().as_slice(),
        [("reports/user_42/march.pdf".to_string(), 3, "application/pdf".to_string())]
    );
}

#[test]
fn unconfigured_store_falls_back_to_deterministic_mock() {
    let a = upload(None, 42, "march report.pdf", vec![0], "application/pdf").unwrap();
    let b = upload(None, 42, "march report.pdf", vec![9, 9], "application/pdf").unwrap();
    assert!(a.mocked);
    assert_eq!(a, b);
    assert_eq!(
        a.url,
        "https://mock-storage.finboard.local/reports/user_42/march%20report.pdf"
    );
    assert_eq!(mock_url("reports/user_1/x.pdf"), "https://mock-storage.finboard.local/reports/user_1/x.pdf");
}

#[test]
fn filenames_cannot_escape_the_user_prefix() {
    for bad in ["", "  ", "../x.pdf", "a/b.pdf", "a\\b.pdf", ".."] {
        assert!(
            matches!(object_key(1, bad), Err(StorageError::BadFilename(_))),
            "{:?}",
            bad
        );
    }
}

#[test]
fn content_types() {
    assert_eq!(content_type_for("a.PDF"), "application/pdf");
    assert_eq!(content_type_for("a.csv"), "text/csv");
    assert_eq!(content_type_for("noext"), "application/octet-stream");
}
