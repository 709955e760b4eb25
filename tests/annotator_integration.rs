//! End-to-end annotation scenarios through the public API.

use spanmark::{
    AddressFields, AnnotatedSpan, Annotator, ConflictStrategy, EntityKind, MatchFields,
    MockDetector, PatternDetector, RawMatch, StyleRules, StyleToken, NEUTRAL_TOKEN,
};

#[test]
fn test_phone_and_link_end_to_end() {
    let text = "Call 555-123-4567 or visit https://example.com";
    let annotator = Annotator::with_patterns().unwrap();

    let spans = annotator.annotate(text).unwrap();
    assert_eq!(spans.len(), 2);

    // Ordered by start offset: phone first
    let phone = &spans[0];
    assert_eq!(phone.kind, EntityKind::PhoneNumber);
    assert_eq!(phone.text, "555-123-4567");
    assert_eq!(phone.value, "5551234567");
    assert_eq!(&text[phone.start..phone.end], "555-123-4567");

    let link = &spans[1];
    assert_eq!(link.kind, EntityKind::Link);
    assert_eq!(link.text, "https://example.com");
    assert_eq!(link.value, "https://example.com");
}

#[test]
fn test_address_formatting_end_to_end() {
    let annotator = Annotator::with_patterns().unwrap();
    let spans = annotator
        .annotate("Our office: 1 Main St, Springfield, IL 62704")
        .unwrap();

    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].kind, EntityKind::Address);
    assert_eq!(spans[0].value, "1 Main St Springfield, IL, 62704");
}

#[test]
fn test_address_without_street_is_suppressed() {
    // Detection reports the city-state-zip fragment; the annotator drops it.
    let annotator = Annotator::with_patterns().unwrap();
    let spans = annotator.annotate("Weather for Springfield, IL 62704").unwrap();
    assert!(spans.is_empty());
}

#[test]
fn test_suppression_applies_to_custom_detectors_too() {
    let streetless = RawMatch::with_fields(
        MatchFields::Address(AddressFields {
            city: Some("Springfield".into()),
            state: Some("IL".into()),
            zip: Some("62704".into()),
            ..Default::default()
        }),
        0,
        10,
    );
    let annotator = Annotator::builder()
        .detector(MockDetector::new("mock").with_matches(vec![streetless]))
        .build()
        .unwrap();

    assert!(annotator.annotate("0123456789").unwrap().is_empty());
}

#[test]
fn test_link_without_url_keeps_span_with_empty_value() {
    let unresolved = RawMatch::with_fields(MatchFields::Link { url: None }, 0, 7);
    let annotator = Annotator::builder()
        .detector(MockDetector::new("mock").with_matches(vec![unresolved]))
        .style(EntityKind::Link, StyleToken::new("blue"))
        .build()
        .unwrap();

    let spans = annotator.annotate("example text").unwrap();
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].value, "");
    assert_eq!(spans[0].text, "example");
    assert_eq!(spans[0].style.as_str(), "blue");
}

#[test]
fn test_empty_input_is_not_an_error() {
    let annotator = Annotator::with_patterns().unwrap();
    assert!(annotator.annotate("").unwrap().is_empty());
}

#[test]
fn test_style_resolution_with_neutral_fallback() {
    let rules = StyleRules::new()
        .with(EntityKind::Link, "link-style")
        .with(EntityKind::PhoneNumber, "phone-style");

    let annotator = Annotator::builder()
        .detector(PatternDetector::new())
        .styles(rules)
        .build()
        .unwrap();

    let spans = annotator
        .annotate("555-123-4567, https://example.com, and 1 Main St, Springfield, IL 62704")
        .unwrap();

    let by_kind = |kind: EntityKind| -> &AnnotatedSpan {
        spans.iter().find(|s| s.kind == kind).unwrap()
    };
    assert_eq!(by_kind(EntityKind::Link).style.as_str(), "link-style");
    assert_eq!(by_kind(EntityKind::PhoneNumber).style.as_str(), "phone-style");
    // No address rule set: neutral default
    assert_eq!(by_kind(EntityKind::Address).style.as_str(), NEUTRAL_TOKEN);
}

#[test]
fn test_determinism_byte_identical() {
    let text = "Call 555-123-4567 or visit https://example.com";
    let annotator = Annotator::with_patterns().unwrap();

    let first = serde_json::to_string(&annotator.annotate(text).unwrap()).unwrap();
    let second = serde_json::to_string(&annotator.annotate(text).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_detector_subset_configuration() {
    let phones_only = PatternDetector::for_kinds(&[EntityKind::PhoneNumber]).unwrap();
    let annotator = Annotator::builder().detector(phones_only).build().unwrap();

    let spans = annotator
        .annotate("Call 555-123-4567 or visit https://example.com")
        .unwrap();
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].kind, EntityKind::PhoneNumber);
}

#[test]
fn test_cross_detector_priority() {
    // A custom layer ahead of the pattern layer claims the phone range first
    let custom = RawMatch::with_fields(
        MatchFields::Link {
            url: Some("tel:override".into()),
        },
        5,
        17,
    );
    let annotator = Annotator::builder()
        .detector(MockDetector::new("custom").with_matches(vec![custom]))
        .detector(PatternDetector::new())
        .build()
        .unwrap();

    let spans = annotator.annotate("Call 555-123-4567 today").unwrap();
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].kind, EntityKind::Link);
    assert_eq!(spans[0].value, "tel:override");
}

#[test]
fn test_cross_detector_longest_span() {
    let short = RawMatch::new(MatchFields::Link { url: Some("short".into()) }, 5, 10, 0.99);
    let long = RawMatch::new(MatchFields::Link { url: Some("long".into()) }, 5, 17, 0.10);

    let annotator = Annotator::builder()
        .detector(MockDetector::new("short").with_matches(vec![short]))
        .detector(MockDetector::new("long").with_matches(vec![long]))
        .strategy(ConflictStrategy::LongestSpan)
        .build()
        .unwrap();

    let spans = annotator.annotate("Call 555-123-4567 today").unwrap();
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].value, "long");
}

#[test]
fn test_annotator_is_shareable_across_threads() {
    let annotator = Annotator::with_patterns().unwrap();
    let text = "Call 555-123-4567 or visit https://example.com";

    let (a, b) = std::thread::scope(|scope| {
        let h1 = scope.spawn(|| annotator.annotate(text).unwrap());
        let h2 = scope.spawn(|| annotator.annotate(text).unwrap());
        (h1.join().unwrap(), h2.join().unwrap())
    });

    assert_eq!(a, b);
    assert_eq!(a.len(), 2);
}

#[test]
fn test_spans_serialize_for_downstream_renderers() {
    let annotator = Annotator::builder()
        .detector(PatternDetector::new())
        .style(EntityKind::Link, "blue-underline")
        .build()
        .unwrap();

    let spans = annotator.annotate("see https://example.com").unwrap();
    let json = serde_json::to_string(&spans).unwrap();
    let back: Vec<AnnotatedSpan> = serde_json::from_str(&json).unwrap();
    assert_eq!(spans, back);
}
