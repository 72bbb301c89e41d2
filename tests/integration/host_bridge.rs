//! Host bridge round trips over in-memory buffers.

use std::sync::Arc;

use carbonshift::host::contract::{ResponseEnvelope, ToolCallEnvelope};
use carbonshift::host::stdio::run_bridge;
use carbonshift::{ToolMode, build_registry};

use crate::helpers::temp_config;

async fn exchange(mode: ToolMode, requests: &[ToolCallEnvelope]) -> Vec<ResponseEnvelope> {
    let dir = tempfile::tempdir().unwrap();
    let service = temp_config(&dir).build_service();
    let registry = Arc::new(build_registry(&service, mode));

    let mut input = String::new();
    for request in requests {
        input.push_str(&serde_json::to_string(request).unwrap());
        input.push('\n');
    }

    let mut output = Vec::new();
    run_bridge(registry, input.as_bytes(), &mut output).await.unwrap();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn update_then_recommend_in_one_session() {
    let responses = exchange(
        ToolMode::Full,
        &[
            ToolCallEnvelope::new(
                "1",
                "update_preferences",
                serde_json::json!({"regions_allowed": "sg,us_west", "allowed_shift_minutes": 30}),
            ),
            ToolCallEnvelope::new("2", "list_regions", serde_json::json!({})),
            ToolCallEnvelope::new(
                "3",
                "recommend_best",
                serde_json::json!({"start_iso": "2025-09-13T12:00:00"}),
            ),
        ],
    )
    .await;

    assert_eq!(responses.len(), 3);
    assert!(responses.iter().all(|r| r.ok), "{responses:?}");
    assert_eq!(responses[0].payload["allowed_shift_minutes"], 30);
    assert_eq!(responses[1].payload, serde_json::json!(["SG", "US_WEST"]));
    assert_eq!(responses[2].request_id, "3");
    assert_eq!(responses[2].payload["region"], "US_WEST");
}

#[tokio::test]
async fn read_only_mode_rejects_updates() {
    let responses = exchange(
        ToolMode::ReadOnly,
        &[
            ToolCallEnvelope::new(
                "1",
                "update_preferences",
                serde_json::json!({"allowed_shift_minutes": 0}),
            ),
            ToolCallEnvelope::new("2", "get_profile", serde_json::json!({})),
        ],
    )
    .await;

    assert!(!responses[0].ok);
    assert_eq!(responses[0].code.as_deref(), Some("TOOL_FAILED"));
    assert_eq!(responses[1].payload["allowed_shift_minutes"], 60);
}

#[tokio::test]
async fn empty_result_is_empty_object() {
    let responses = exchange(
        ToolMode::Full,
        &[ToolCallEnvelope::new(
            "1",
            "best_slot_in_window",
            serde_json::json!({"region": "MARS", "start_iso": "2025-09-13T12:00:00", "window_minutes": 60}),
        )],
    )
    .await;
    assert!(responses[0].ok);
    assert_eq!(responses[0].payload, serde_json::json!({}));
}

#[tokio::test]
async fn wrong_version_is_rejected() {
    let mut request = ToolCallEnvelope::new("1", "host.ping", serde_json::json!({}));
    request.v = 2;
    let responses = exchange(ToolMode::Full, &[request]).await;
    assert!(!responses[0].ok);
    assert_eq!(responses[0].request_id, "1");
    assert!(responses[0].error.as_deref().unwrap().contains("version"));
}
