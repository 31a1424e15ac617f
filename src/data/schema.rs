// Analytics payload model
// Author: Gabriel Demetrios Lafis

use std::str::FromStr;

use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use super::{to_string_safe, DataError, Row, Value};

/// Look up the first of several member names that is present
fn member<'a>(json: &'a JsonValue, names: &[&str]) -> Option<&'a JsonValue> {
    names.iter().find_map(|name| json.get(*name))
}

/// One metric declared by the query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricHint {
    /// Output column name, sent as `as`
    pub alias: Option<Value>,
}

impl MetricHint {
    fn from_value(value: &Value) -> Self {
        MetricHint {
            alias: value.get("as").cloned(),
        }
    }
}

/// Chart preferences carried inside the query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartHint {
    pub chart_type: Option<Value>,
    pub y: Option<Value>,
}

impl ChartHint {
    fn from_value(value: &Value) -> Self {
        ChartHint {
            chart_type: value.get("type").cloned(),
            y: value.get("y").cloned(),
        }
    }
}

/// Structured description of the analytic request
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsQuery {
    /// Grouping fields; `None` unless the payload sent an array
    pub dimensions: Option<Vec<Value>>,
    /// Declared metrics; `None` unless the payload sent an array
    pub metrics: Option<Vec<MetricHint>>,
    pub chart: Option<ChartHint>,
    raw: Value,
}

impl Default for AnalyticsQuery {
    fn default() -> Self {
        AnalyticsQuery {
            dimensions: None,
            metrics: None,
            chart: None,
            raw: Value::Map(Row::new()),
        }
    }
}

impl AnalyticsQuery {
    /// Read a query leniently; members of the wrong shape are ignored
    pub fn from_value(raw: Value) -> Self {
        let dimensions = raw
            .get("dimensions")
            .and_then(Value::as_array)
            .map(|dims| dims.to_vec());

        let metrics = raw
            .get("metrics")
            .and_then(Value::as_array)
            .map(|metrics| metrics.iter().map(MetricHint::from_value).collect());

        let chart = raw
            .get("chart")
            .filter(|chart| chart.as_map().is_some())
            .map(ChartHint::from_value);

        AnalyticsQuery {
            dimensions,
            metrics,
            chart,
            raw,
        }
    }

    /// Alias of the first declared metric, if any
    pub fn first_metric_alias(&self) -> Option<&Value> {
        self.metrics
            .as_ref()
            .and_then(|metrics| metrics.first())
            .and_then(|metric| metric.alias.as_ref())
    }

    /// The query exactly as received
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

/// Rendering primitive named by the chart spec
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Absent,
    /// `"mark": "bar"`
    Name(String),
    /// `"mark": {"type": "bar", ...}`
    Typed(Option<Value>),
}

impl Default for Mark {
    fn default() -> Self {
        Mark::Absent
    }
}

impl Mark {
    fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(name)) => Mark::Name(name.clone()),
            Some(Value::Map(row)) => Mark::Typed(row.get("type").cloned()),
            _ => Mark::Absent,
        }
    }

    /// Lowercase mark name, empty when there is none
    pub fn normalized(&self) -> String {
        match self {
            Mark::Absent => String::new(),
            Mark::Name(name) => name.to_lowercase(),
            Mark::Typed(mark_type) => to_string_safe(mark_type.as_ref(), "").to_lowercase(),
        }
    }
}

/// Visual channel mapping of the chart spec
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Encoding {
    /// `encoding.x.field`, possibly a comma-separated list
    pub x_field: Option<Value>,
    /// `encoding.y.field`
    pub y_field: Option<Value>,
}

/// Chart description produced independently of the query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSpec {
    pub mark: Mark,
    pub encoding: Encoding,
}

impl ChartSpec {
    /// Read a chart spec leniently
    pub fn from_value(raw: &Value) -> Self {
        let encoding = raw.get("encoding");
        let channel_field = |channel: &str| {
            encoding
                .and_then(|e| e.get(channel))
                .and_then(|c| c.get("field"))
                .cloned()
        };

        ChartSpec {
            mark: Mark::from_value(raw.get("mark")),
            encoding: Encoding {
                x_field: channel_field("x"),
                y_field: channel_field("y"),
            },
        }
    }
}

/// Result of one analytics query as returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "JsonValue")]
pub struct AnalyticsResult {
    pub request_id: String,
    pub query: AnalyticsQuery,
    pub sql: String,
    pub rows: Vec<Row>,
    pub chart_spec: ChartSpec,
    pub summary: String,
}

impl AnalyticsResult {
    /// Build a result from any JSON document; missing or odd members default
    pub fn from_json(json: &JsonValue) -> Self {
        let text = |names: &[&str]| {
            let value = member(json, names).map(Value::from);
            to_string_safe(value.as_ref(), "")
        };

        let query = member(json, &["dsl", "query"])
            .map(Value::from)
            .map(AnalyticsQuery::from_value)
            .unwrap_or_default();

        let rows = member(json, &["data", "rows"])
            .and_then(JsonValue::as_array)
            .map(|rows| rows.iter().map(Row::from_json).collect())
            .unwrap_or_default();

        let chart_spec = member(json, &["chart_spec", "chartSpec"])
            .map(Value::from)
            .map(|spec| ChartSpec::from_value(&spec))
            .unwrap_or_default();

        AnalyticsResult {
            request_id: text(&["request_id", "requestId"]),
            query,
            sql: text(&["sql"]),
            rows,
            chart_spec,
            summary: text(&["summary"]),
        }
    }

    /// Diagnostic view of the request: id, query and generated SQL
    pub fn debug_payload(&self) -> JsonValue {
        json!({
            "request_id": self.request_id,
            "dsl": self.query.raw().to_json(),
            "sql": self.sql,
        })
    }
}

impl FromStr for AnalyticsResult {
    type Err = DataError;

    /// Parse a result from JSON text; only malformed JSON is an error
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let json: JsonValue = serde_json::from_str(text)?;
        Ok(AnalyticsResult::from_json(&json))
    }
}

impl From<JsonValue> for AnalyticsResult {
    fn from(json: JsonValue) -> Self {
        AnalyticsResult::from_json(&json)
    }
}
