//! Unit tests for Header and Headers.

use std::collections::HashSet;
use stomp_session::{Header, HeaderKind, Headers};

fn every_variant() -> Vec<Header> {
    vec![
        Header::AcceptVersion("1.2".into()),
        Header::HeartBeat("15000,0".into()),
        Header::Destination("/queue/a".into()),
        Header::Id("sub-0".into()),
        Header::Version("1.2".into()),
        Header::Subscription("sub-0".into()),
        Header::MessageId("1234".into()),
        Header::ContentLength("0".into()),
        Header::Message("boom".into()),
        Header::ContentType("text/plain".into()),
        Header::custom("eid", "5566"),
    ]
}

#[test]
fn from_wire_reconstructs_every_variant() {
    for h in every_variant() {
        let rebuilt = Header::from_wire(h.key(), h.value());
        assert_eq!(rebuilt, h);
        assert_eq!(rebuilt.key(), h.key());
        assert_eq!(rebuilt.value(), h.value());
        assert_eq!(rebuilt.kind(), h.kind());
    }
}

#[test]
fn from_wire_maps_known_keys() {
    assert!(matches!(
        Header::from_wire("destination", "/x"),
        Header::Destination(ref v) if v == "/x"
    ));
    assert!(matches!(
        Header::from_wire("message-id", "7"),
        Header::MessageId(ref v) if v == "7"
    ));
    assert!(matches!(
        Header::from_wire("accept-version", "1.2"),
        Header::AcceptVersion(_)
    ));
    assert!(matches!(Header::from_wire("id", "x"), Header::Id(_)));
}

#[test]
fn from_wire_unknown_key_is_custom() {
    let h = Header::from_wire("x-trace", "abc");
    assert_eq!(h.kind(), HeaderKind::Custom);
    assert_eq!(h.key(), "x-trace");
    assert_eq!(h.value(), "abc");
}

#[test]
fn keys_are_case_sensitive() {
    assert_eq!(Header::from_wire("Destination", "/x").kind(), HeaderKind::Custom);
}

#[test]
fn equality_is_by_key_only() {
    assert_eq!(
        Header::Destination("/a".into()),
        Header::Destination("/b".into())
    );
    assert_eq!(Header::custom("destination", "/b"), Header::Destination("/a".into()));
    assert_ne!(Header::Id("x".into()), Header::Subscription("x".into()));
}

#[test]
fn hashing_is_by_key_only() {
    let mut set = HashSet::new();
    set.insert(Header::Destination("/a".into()));
    assert!(!set.insert(Header::Destination("/b".into())));
    assert_eq!(set.len(), 1);
}

#[test]
fn custom_constructor_keeps_key_untyped() {
    let h = Header::custom("destination", "/x");
    assert_eq!(h.kind(), HeaderKind::Custom);
    assert_eq!(h.key(), "destination");
}

#[test]
fn headers_insert_replaces_same_key() {
    let mut headers = Headers::new();
    assert!(headers.insert(Header::Id("generated".into())).is_none());
    let previous = headers.insert(Header::custom("id", "caller"));
    assert_eq!(previous.map(|h| h.value().to_string()), Some("generated".into()));
    assert_eq!(headers.len(), 1);
    assert_eq!(headers.get("id"), Some("caller"));
}

#[test]
fn headers_lookup_and_remove() {
    let mut headers: Headers = vec![
        Header::Destination("/queue/a".into()),
        Header::ContentType("application/json".into()),
    ]
    .into_iter()
    .collect();
    assert!(headers.contains("destination"));
    assert_eq!(headers.get("content-type"), Some("application/json"));
    assert!(headers.get("message").is_none());
    assert!(matches!(
        headers.get_header("destination"),
        Some(Header::Destination(_))
    ));

    assert!(headers.remove("destination").is_some());
    assert!(!headers.contains("destination"));
    assert_eq!(headers.len(), 1);
}

#[test]
fn headers_equality_compares_values() {
    let a: Headers = [Header::Destination("/a".into())].into_iter().collect();
    let b: Headers = [Header::Destination("/b".into())].into_iter().collect();
    let a2: Headers = [Header::custom("destination", "/a")].into_iter().collect();
    assert_ne!(a, b);
    assert_eq!(a, a2);
}

#[test]
fn headers_extend_and_iterate() {
    let mut headers = Headers::new();
    assert!(headers.is_empty());
    headers.extend(every_variant());
    assert_eq!(headers.len(), 11);
    let keys: HashSet<&str> = headers.iter().map(Header::key).collect();
    assert!(keys.contains("heart-beat"));
    assert!(keys.contains("eid"));
    assert_eq!((&headers).into_iter().count(), 11);
}
