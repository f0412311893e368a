use crate::errors::ToolError;
use chrono::SecondsFormat;
use serde_json::Value;
use std::future::Future;

/// What to do when one item fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    #[default]
    Abort,
    ContinueOnFail,
}

impl FailurePolicy {
    pub fn from_flag(continue_on_fail: bool) -> Self {
        if continue_on_fail {
            FailurePolicy::ContinueOnFail
        } else {
            FailurePolicy::Abort
        }
    }
}

#[derive(Debug)]
pub struct ItemResult {
    pub operation: String,
    pub outcome: Result<Value, ToolError>,
}

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn success_record(operation: String, result: Value) -> Value {
    serde_json::json!({
        "result": result,
        "operation": operation,
        "timestamp": timestamp(),
        "success": true,
    })
}

fn failure_record(operation: String, error: &ToolError, item: usize) -> Value {
    serde_json::json!({
        "error": error.message,
        "operation": operation,
        "timestamp": timestamp(),
        "success": false,
        "pairedItem": {"item": item},
    })
}

/// Runs `run_item` for each index in order, one at a time. Output position
/// `i` always belongs to input item `i`.
pub async fn run_batch<F, Fut>(
    item_count: usize,
    policy: FailurePolicy,
    mut run_item: F,
) -> Result<Vec<Value>, ToolError>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = ItemResult>,
{
    let mut out = Vec::with_capacity(item_count);
    for index in 0..item_count {
        let ItemResult { operation, outcome } = run_item(index).await;
        match outcome {
            Ok(result) => out.push(success_record(operation, result)),
            Err(err) if policy == FailurePolicy::ContinueOnFail => {
                out.push(failure_record(operation, &err, index));
            }
            Err(err) => return Err(err),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ToolErrorKind;

    fn outcome(index: usize) -> ItemResult {
        ItemResult {
            operation: "getProfile".to_string(),
            outcome: if index == 1 {
                Err(ToolError::invalid_params("phoneNumber must be a non-empty string"))
            } else {
                Ok(serde_json::json!({"index": index}))
            },
        }
    }

    #[tokio::test]
    async fn continue_policy_keeps_every_item_in_order() {
        let out = run_batch(3, FailurePolicy::ContinueOnFail, |i| async move { outcome(i) })
            .await
            .unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out[0]["success"], true);
        assert_eq!(out[0]["result"]["index"], 0);
        assert_eq!(out[1]["success"], false);
        assert_eq!(out[1]["pairedItem"]["item"], 1);
        assert_eq!(out[1]["error"], "phoneNumber must be a non-empty string");
        assert_eq!(out[2]["success"], true);
        assert_eq!(out[2]["result"]["index"], 2);
    }

    #[tokio::test]
    async fn abort_policy_stops_at_first_failure() {
        let mut seen = Vec::new();
        let err = run_batch(3, FailurePolicy::Abort, |i| {
            seen.push(i);
            async move { outcome(i) }
        })
        .await
        .unwrap_err();
        assert_eq!(err.kind, ToolErrorKind::InvalidParams);
        assert_eq!(seen, vec![0, 1]);
    }

    #[tokio::test]
    async fn timestamps_are_iso_8601_utc() {
        let out = run_batch(1, FailurePolicy::Abort, |i| async move { outcome(i) })
            .await
            .unwrap();
        let ts = out[0]["timestamp"].as_str().unwrap();
        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }
}
