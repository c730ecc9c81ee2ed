//! Test utilities for `seep_core` (compiled only during testing).

use chrono::{TimeZone, Utc};
use regex::Regex;

use crate::commit::Commit;
use crate::detector::Detector;
use crate::finding::Finding;

pub fn make_detector(name: &str, regex: &str, keywords: &[&str]) -> Detector {
    Detector {
        name: name.into(),
        description: "Test detector".into(),
        regex: Regex::new(regex).unwrap(),
        keywords: keywords.iter().map(|&s| s.into()).collect(),
    }
}

pub fn make_commit(hash: &str) -> Commit {
    Commit {
        hash: hash.to_string(),
        author: "Test Author <author@example.com>".to_string(),
        date: Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap(),
        message: "test commit".to_string(),
    }
}

pub fn make_finding(detector: &str, offender: &str) -> Finding {
    let commit = make_commit("c0ffee0000000000000000000000000000000000");
    Finding {
        line: format!("+secret={offender}"),
        commit: commit.hash,
        offender: offender.to_string(),
        detector: detector.to_string(),
        message: commit.message,
        author: commit.author,
        date: commit.date,
        file: "config.env".to_string(),
        repo_url: "https://example.com/acme/widget".to_string(),
    }
}
