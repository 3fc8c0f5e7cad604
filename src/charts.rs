//! Chart.js interop and the chart configurations built from analytics.

use serde::Serialize;
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;

use crate::models::Analytics;

pub const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const TOPIC_COLORS: [&str; 4] = ["#667eea", "#764ba2", "#f093fb", "#4c51bf"];

#[wasm_bindgen]
extern "C" {
    /// A Chart.js chart bound to one canvas.
    type Chart;

    #[wasm_bindgen(constructor, catch)]
    fn new(canvas: &web_sys::HtmlCanvasElement, config: &JsValue) -> Result<Chart, JsValue>;

    #[wasm_bindgen(method)]
    fn destroy(this: &Chart);
}

/// Owns a live chart; dropping the handle does not destroy it, call [`ChartHandle::destroy`].
pub struct ChartHandle(Chart);

impl ChartHandle {
    pub fn create(canvas: &web_sys::HtmlCanvasElement, config: &Value) -> Result<Self, JsValue> {
        // Chart.js expects plain objects, not `Map`s.
        let config = config.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?;
        Chart::new(canvas, &config).map(ChartHandle)
    }

    pub fn destroy(self) {
        self.0.destroy();
    }
}

/// Bar chart of per-topic efficiency, in percent, topics in name order.
pub fn topic_chart(analytics: &Analytics) -> Value {
    let labels: Vec<&str> = analytics.topic_efficiency.keys().map(String::as_str).collect();
    let data: Vec<f64> = analytics
        .topic_efficiency
        .values()
        .map(|v| (v * 100.0).clamp(0.0, 100.0))
        .collect();
    let colors: Vec<&str> = (0..labels.len())
        .map(|i| TOPIC_COLORS[i % TOPIC_COLORS.len()])
        .collect();

    json!({
        "type": "bar",
        "data": {
            "labels": labels,
            "datasets": [{
                "label": "Efficiency (%)",
                "data": data,
                "backgroundColor": colors,
                "borderWidth": 1
            }]
        },
        "options": {
            "responsive": true,
            "plugins": { "legend": { "display": false } },
            "scales": { "y": { "beginAtZero": true, "max": 100 } }
        }
    })
}

/// Line chart of events per weekday, Monday first; missing days plot as 0.
pub fn activity_chart(analytics: &Analytics) -> Value {
    let data: Vec<f64> = (0..WEEKDAYS.len())
        .map(|day| analytics.weekly_activity.get(day).copied().unwrap_or(0.0))
        .collect();

    json!({
        "type": "line",
        "data": {
            "labels": WEEKDAYS,
            "datasets": [{
                "label": "Activity",
                "data": data,
                "borderColor": "#48bb78",
                "backgroundColor": "rgba(72, 187, 120, 0.2)",
                "fill": true,
                "tension": 0.4
            }]
        },
        "options": {
            "responsive": true,
            "plugins": { "legend": { "display": false } },
            "scales": { "y": { "beginAtZero": true } }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_chart_uses_percent_in_name_order() {
        let mut analytics = Analytics::default();
        analytics.topic_efficiency.insert("physics".into(), 0.72);
        analytics.topic_efficiency.insert("algebra".into(), 0.85);
        analytics.topic_efficiency.insert("essays".into(), 1.4);

        let config = topic_chart(&analytics);
        assert_eq!(config["type"], "bar");
        assert_eq!(config["data"]["labels"], json!(["algebra", "essays", "physics"]));

        let data = config["data"]["datasets"][0]["data"].as_array().unwrap();
        let values: Vec<f64> = data.iter().map(|v| v.as_f64().unwrap()).collect();
        assert!((values[0] - 85.0).abs() < 1e-9);
        assert_eq!(values[1], 100.0);
        assert!((values[2] - 72.0).abs() < 1e-9);
    }

    #[test]
    fn topic_chart_without_topics_is_empty() {
        let config = topic_chart(&Analytics::default());
        assert_eq!(config["data"]["labels"], json!([]));
        assert_eq!(config["data"]["datasets"][0]["data"], json!([]));
    }

    #[test]
    fn activity_chart_pads_missing_days() {
        let analytics = Analytics {
            weekly_activity: vec![12.0, 19.0, 8.0],
            ..Default::default()
        };
        let config = activity_chart(&analytics);

        assert_eq!(config["type"], "line");
        assert_eq!(config["data"]["labels"], json!(WEEKDAYS));
        assert_eq!(
            config["data"]["datasets"][0]["data"],
            json!([12.0, 19.0, 8.0, 0.0, 0.0, 0.0, 0.0])
        );
    }

    #[test]
    fn chart_configs_are_stable() {
        let mut analytics = Analytics {
            weekly_activity: vec![1.0; 9],
            ..Default::default()
        };
        analytics.topic_efficiency.insert("algebra".into(), 0.5);

        assert_eq!(topic_chart(&analytics), topic_chart(&analytics));
        assert_eq!(activity_chart(&analytics), activity_chart(&analytics));
        assert_eq!(
            activity_chart(&analytics)["data"]["datasets"][0]["data"]
                .as_array()
                .unwrap()
                .len(),
            7
        );
    }
}
