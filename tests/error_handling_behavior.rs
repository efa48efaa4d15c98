//! Behavior-driven tests for encode failure handling
//!
//! These tests verify HOW the orchestrator reports failures: first failure
//! wins, the offending part is identified, the cause chain stays intact,
//! and stream resources follow the documented release rules.

use std::error::Error as _;
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use formpart_core::{
    EncodeError, FileStream, JsonValue, Part, Parts, SourceErrorKind,
};
use formpart_tests::{CountingSource, FailingReader};
use serde::ser::Error as _;
use serde::{Serialize, Serializer};

/// Sink double that refuses every write.
struct RefusingSink;

impl Write for RefusingSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("sink refuses all writes"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Value whose `Serialize` impl always fails, standing in for a cyclic or
/// otherwise unencodable structure.
struct Unserializable;

impl Serialize for Unserializable {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(S::Error::custom("structure cannot be encoded"))
    }
}

// =============================================================================
// Failure Handling: First Failure Wins
// =============================================================================

#[test]
fn when_third_part_fails_later_sources_are_never_invoked() {
    // Given: Five counting sources, the third of which fails
    let counters: Vec<Arc<AtomicUsize>> =
        (0..5).map(|_| Arc::new(AtomicUsize::new(0))).collect();
    let mut parts = Parts::new();
    for (index, counter) in counters.iter().enumerate() {
        let source = if index == 2 {
            CountingSource::failing(Arc::clone(counter))
        } else {
            CountingSource::succeeding(Arc::clone(counter))
        };
        parts.push(Part::new(format!("part{}", index + 1), source));
    }
    let mut body = Vec::new();

    // When: The sequence is encoded
    let error = parts.write_into(&mut body).expect_err("third part must fail");

    // Then: The error names the offending part and sources 4 and 5 never ran
    assert_eq!(error.part_name(), Some("part3"));
    assert_eq!(error.source_kind(), Some(SourceErrorKind::StreamCopy));
    assert_eq!(counters[0].load(Ordering::SeqCst), 1);
    assert_eq!(counters[1].load(Ordering::SeqCst), 1);
    assert_eq!(counters[2].load(Ordering::SeqCst), 1);
    assert_eq!(counters[3].load(Ordering::SeqCst), 0);
    assert_eq!(counters[4].load(Ordering::SeqCst), 0);
}

#[test]
fn when_a_part_fails_the_cause_chain_stays_intact() {
    // Given: A sequence whose only part fails during the body copy
    let calls = Arc::new(AtomicUsize::new(0));
    let parts = Parts::new().with_part("doomed", CountingSource::failing(calls));
    let mut body = Vec::new();

    // When: The sequence is encoded
    let error = parts.write_into(&mut body).expect_err("part must fail");

    // Then: The wrapping error chains down to the original io error
    let source_error = error.source().expect("part error carries a cause");
    let io_cause = source_error.source().expect("source error carries a cause");
    assert!(io_cause.to_string().contains("double configured to fail"));
}

// =============================================================================
// Failure Handling: Serialization
// =============================================================================

#[test]
fn when_value_cannot_serialize_no_byte_reaches_the_sink() {
    // Given: A json part wrapping a value that refuses to serialize
    let parts = Parts::new().with_part("meta", JsonValue::new(Unserializable));
    let mut body = Vec::new();

    // When: The sequence is encoded
    let error = parts.write_into(&mut body).expect_err("serialization must fail");

    // Then: The failure is classified and the sink never saw a field header
    assert_eq!(error.part_name(), Some("meta"));
    assert_eq!(error.source_kind(), Some(SourceErrorKind::Serialization));
    assert!(body.is_empty(), "no field bytes may be written: {body:?}");
}

// =============================================================================
// Failure Handling: Stream Resources
// =============================================================================

#[test]
fn when_stream_copy_fails_the_closer_is_not_invoked() {
    // Given: A file part whose reader fails mid-copy, with a closer attached
    let closed = Arc::new(AtomicUsize::new(0));
    let closed_probe = Arc::clone(&closed);
    let source = FileStream::new("broken.bin", FailingReader::new())
        .with_closer(move || {
            closed_probe.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
    let parts = Parts::new().with_part("file", source);
    let mut body = Vec::new();

    // When: The sequence is encoded
    let error = parts.write_into(&mut body).expect_err("copy must fail");

    // Then: The failure is a stream copy error and the closer never ran.
    // Release is skipped on the error path; callers needing unconditional
    // cleanup own the resource outside the source.
    assert_eq!(error.source_kind(), Some(SourceErrorKind::StreamCopy));
    assert_eq!(closed.load(Ordering::SeqCst), 0);
}

#[test]
fn when_the_closer_fails_encode_reports_resource_release() {
    // Given: A file part whose copy succeeds but whose closer fails
    let source = FileStream::new("x.txt", &b"payload"[..])
        .with_closer(|| Err(io::Error::other("release rejected")));
    let parts = Parts::new().with_part("file", source);
    let mut body = Vec::new();

    // When: The sequence is encoded
    let error = parts.write_into(&mut body).expect_err("closer failure surfaces");

    // Then: The failure is classified as resource release for that part
    assert_eq!(error.part_name(), Some("file"));
    assert_eq!(error.source_kind(), Some(SourceErrorKind::ResourceRelease));
}

// =============================================================================
// Failure Handling: Finalization
// =============================================================================

#[test]
fn when_the_sink_rejects_the_terminator_encode_reports_finalization() {
    // Given: An empty sequence over a sink that refuses every write, so the
    // only write that can fail is the terminator itself
    let parts = Parts::new();
    let mut sink = RefusingSink;

    // When: The sequence is encoded
    let error = parts.write_into(&mut sink).expect_err("finalize must fail");

    // Then: The failure is a finalization error with no part attached
    assert!(matches!(error, EncodeError::Finalization(_)));
    assert_eq!(error.part_name(), None);
    assert_eq!(error.source_kind(), None);
}
