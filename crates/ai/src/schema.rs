//! Response schema constraining the model output to an `EntryAnalysis`.

use serde_json::{json, Value};

fn asset_allocation_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "value": { "type": "NUMBER" },
            "percentage": { "type": "NUMBER" },
            "color": {
                "type": "STRING",
                "description": "A hex color code suitable for this asset class"
            }
        },
        "required": ["name", "value", "percentage", "color"]
    })
}

fn action_item_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "date": { "type": "STRING" },
            "asset": { "type": "STRING" },
            "action": { "type": "STRING" },
            "status": { "type": "STRING", "enum": ["pending", "completed"] }
        },
        "required": ["date", "asset", "action", "status"]
    })
}

fn portfolio_stats_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "totalAssets": { "type": "NUMBER" },
            "totalPnL": { "type": "NUMBER" },
            "pnlPercentage": { "type": "NUMBER" },
            "assetBreakdown": { "type": "ARRAY", "items": asset_allocation_schema() }
        },
        "required": ["totalAssets", "totalPnL", "assetBreakdown"]
    })
}

/// Schema of the whole analysis payload.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "content": {
                "type": "STRING",
                "description": "A comprehensive markdown formatted journal entry with sections for Summary, Growth, and Reflection."
            },
            "stats": portfolio_stats_schema(),
            "actionPlan": { "type": "ARRAY", "items": action_item_schema() }
        },
        "required": ["title", "content", "stats", "actionPlan"]
    })
}
