use std::fmt::{self, Write};

use landing_shared_contracts::time::{iso_timestamp, TimeService};
use serde_json::{Map, Value};
use tracing::{
    field::{Field, Visit},
    Event, Subscriber,
};
use tracing_subscriber::{
    fmt::{format, FmtContext, FormatEvent, FormatFields},
    registry::LookupSpan,
};

/// Formats events as `[timestamp] [LEVEL] message`, followed by the
/// pretty-printed JSON object of all other fields, if there are any.
///
/// Field names containing dots are nested, so `error.message` and
/// `error.stack` end up in a common `error` object.
#[derive(Debug, Clone)]
pub struct LogFormat<Time> {
    time: Time,
}

impl<Time> LogFormat<Time> {
    pub fn new(time: Time) -> Self {
        Self { time }
    }
}

impl<S, N, Time> FormatEvent<S, N> for LogFormat<Time>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
    Time: TimeService,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut visitor = JsonVisitor::default();
        event.record(&mut visitor);

        write!(
            writer,
            "[{}] [{}] {}",
            iso_timestamp(self.time.now()),
            event.metadata().level(),
            visitor.message
        )?;

        if !visitor.fields.is_empty() {
            let fields = serde_json::to_string_pretty(&visitor.fields).map_err(|_| fmt::Error)?;
            writer.write_char('\n')?;
            writer.write_str(&fields)?;
        }

        writer.write_char('\n')
    }
}

#[derive(Default)]
struct JsonVisitor {
    message: String,
    fields: Map<String, Value>,
}

impl JsonVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        insert_nested(&mut self.fields, field.name(), value);
    }
}

impl Visit for JsonVisitor {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, value.into());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, value.into());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.into();
        } else {
            self.insert(field, value.into());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.insert(field, format!("{value:?}").into());
        }
    }
}

fn insert_nested(map: &mut Map<String, Value>, name: &str, value: Value) {
    let Some((head, tail)) = name.split_once('.') else {
        map.insert(name.into(), value);
        return;
    };

    let entry = map
        .entry(head)
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    if let Value::Object(inner) = entry {
        insert_nested(inner, tail, value);
    }
}
