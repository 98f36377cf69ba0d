use campaign_service::models::{
    campaign::{CampaignDetails, CampaignType, CampaignView, CreateCampaignRequest},
    error::ApiError,
};
use serde_json::json;

fn parse(body: serde_json::Value) -> Result<(String, CampaignDetails), ApiError> {
    let request: CreateCampaignRequest =
        serde_json::from_value(body).expect("envelope should deserialize");
    request.validate()
}

/// Test: Envelope validation rejects a payload without a type tag
#[test]
fn test_missing_type_is_rejected() {
    let result = parse(json!({
        "name": "No type",
        "message": "hello",
        "sender": { "name": "A", "phone": "+351112" }
    }));

    assert!(matches!(result, Err(ApiError::MissingFields)));
}

/// Test: Envelope validation rejects a payload without a name
#[test]
fn test_missing_name_is_rejected() {
    let result = parse(json!({
        "type": "push",
        "message": "hello",
        "sender": "app"
    }));

    assert!(matches!(result, Err(ApiError::MissingFields)));
}

/// Test: An unrecognized campaign type is rejected even with a full payload
#[test]
fn test_unknown_type_is_rejected() {
    let result = parse(json!({
        "type": "test",
        "name": "Test sms campaign",
        "message": "Hello there",
        "sender": { "name": "Acme", "phone": "+351112" }
    }));

    assert!(matches!(result, Err(ApiError::InvalidType)));
}

/// Test: Envelope presence is checked before the type tag
#[test]
fn test_envelope_check_precedes_type_check() {
    let result = parse(json!({
        "type": "not-a-type",
        "message": "hello"
    }));

    assert!(matches!(result, Err(ApiError::MissingFields)));
}

/// Test: A valid on-site payload parses into its variant
#[test]
fn test_onsite_payload_parses() {
    let (name, details) = parse(json!({
        "type": "on-site",
        "name": "Banner",
        "placeholder": "sidebar",
        "component": "banner",
        "width": "300",
        "height": "250"
    }))
    .expect("valid on-site payload");

    assert_eq!(name, "Banner");
    assert_eq!(details.campaign_type(), CampaignType::OnSite);

    match details {
        CampaignDetails::OnSite(d) => {
            assert_eq!(d.placeholder, "sidebar");
            assert_eq!(d.component, "banner");
            assert_eq!(d.width, "300");
            assert_eq!(d.height, "250");
        }
        other => panic!("expected on-site details, got {:?}", other),
    }
}

/// Test: The nested sms sender object is flattened into sender_* fields
#[test]
fn test_sms_sender_is_flattened() {
    let (_, details) = parse(json!({
        "type": "sms",
        "name": "X",
        "message": "hi",
        "sender": { "name": "A", "phone": "+123" }
    }))
    .expect("valid sms payload");

    match details {
        CampaignDetails::Sms(d) => {
            assert_eq!(d.message, "hi");
            assert_eq!(d.sender_name, "A");
            assert_eq!(d.sender_phone, "+123");
        }
        other => panic!("expected sms details, got {:?}", other),
    }
}

/// Test: The nested email sender object is flattened into sender_* fields
#[test]
fn test_email_sender_is_flattened() {
    let (_, details) = parse(json!({
        "type": "email",
        "name": "Newsletter",
        "message": "hello",
        "sender": { "name": "Marketing", "email": "news@example.com" }
    }))
    .expect("valid email payload");

    match details {
        CampaignDetails::Email(d) => {
            assert_eq!(d.sender_name, "Marketing");
            assert_eq!(d.sender_email, "news@example.com");
        }
        other => panic!("expected email details, got {:?}", other),
    }
}

/// Test: Voice and push payloads parse with their flat required fields
#[test]
fn test_voice_and_push_payloads_parse() {
    let (_, voice) = parse(json!({
        "type": "voice",
        "name": "Robocall",
        "audio_name": "greeting.wav",
        "caller_id": "+351000"
    }))
    .expect("valid voice payload");
    assert_eq!(voice.campaign_type(), CampaignType::Voice);

    let (_, push) = parse(json!({
        "type": "push",
        "name": "Alert",
        "message": "wake up",
        "sender": "app"
    }))
    .expect("valid push payload");
    assert_eq!(push.campaign_type(), CampaignType::Push);
}

/// Test: Each variant rejects a payload missing one of its required fields
#[test]
fn test_missing_variant_field_is_rejected() {
    // on-site without height
    let result = parse(json!({
        "type": "on-site",
        "name": "Banner",
        "placeholder": "sidebar",
        "component": "banner",
        "width": "300"
    }));
    assert!(matches!(result, Err(ApiError::MissingFields)));

    // sms with a sender missing its phone
    let result = parse(json!({
        "type": "sms",
        "name": "X",
        "message": "hi",
        "sender": { "name": "A" }
    }));
    assert!(matches!(result, Err(ApiError::MissingFields)));

    // email without a sender object at all
    let result = parse(json!({
        "type": "email",
        "name": "Newsletter",
        "message": "hello"
    }));
    assert!(matches!(result, Err(ApiError::MissingFields)));

    // voice without caller_id
    let result = parse(json!({
        "type": "voice",
        "name": "Robocall",
        "audio_name": "greeting.wav"
    }));
    assert!(matches!(result, Err(ApiError::MissingFields)));

    // push without message
    let result = parse(json!({
        "type": "push",
        "name": "Alert",
        "sender": "app"
    }));
    assert!(matches!(result, Err(ApiError::MissingFields)));
}

/// Test: Unknown extra fields are ignored rather than rejected
#[test]
fn test_extra_fields_are_ignored() {
    let result = parse(json!({
        "type": "push",
        "name": "Alert",
        "message": "hello",
        "sender": "app",
        "priority": "high"
    }));

    assert!(result.is_ok());
}

/// Test: The five type tags round-trip and anything else is refused
#[test]
fn test_type_tags_round_trip() {
    for tag in ["on-site", "sms", "email", "voice", "push"] {
        let campaign_type = CampaignType::from_tag(tag).expect("recognized tag");
        assert_eq!(campaign_type.as_tag(), tag);
    }

    assert!(CampaignType::from_tag("test").is_none());
    assert!(CampaignType::from_tag("ON-SITE").is_none());
    assert!(CampaignType::from_tag("").is_none());
}

/// Test: Each type maps to its own child table
#[test]
fn test_child_tables_are_distinct() {
    let tables: Vec<&str> = [
        CampaignType::OnSite,
        CampaignType::Sms,
        CampaignType::Email,
        CampaignType::Voice,
        CampaignType::Push,
    ]
    .iter()
    .map(|t| t.child_table())
    .collect();

    for (i, table) in tables.iter().enumerate() {
        assert!(table.starts_with("campaign_"));
        assert!(!tables[i + 1..].contains(table), "duplicate table {}", table);
    }
}

/// Test: A campaign view serializes as a single flat JSON object
#[test]
fn test_view_serializes_flat() {
    let view = CampaignView {
        id: "abc-123".to_string(),
        name: "X".to_string(),
        campaign_type: CampaignType::Sms,
        details: CampaignDetails::Sms(campaign_service::models::campaign::SmsDetails {
            message: "hi".to_string(),
            sender_name: "A".to_string(),
            sender_phone: "+123".to_string(),
        }),
    };

    let body = serde_json::to_value(&view).expect("view serializes");

    assert_eq!(body["id"], "abc-123");
    assert_eq!(body["name"], "X");
    assert_eq!(body["type"], "sms");
    assert_eq!(body["message"], "hi");
    assert_eq!(body["sender_name"], "A");
    assert_eq!(body["sender_phone"], "+123");
}
