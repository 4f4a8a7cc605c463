use juris_core::responses::ActionResult;
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(serde_json::to_value(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print an action result and turn a failed action into a command error.
///
/// JSON and raw output print the whole envelope; tables print only the
/// data, so a failure there is reported through the returned error alone.
pub fn report<T: Serialize>(result: &ActionResult<T>, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json | OutputFormat::Raw => output(result, format)?,
        OutputFormat::Table => {
            if let Some(data) = &result.data {
                output(data, format)?;
            }
        }
    }

    match &result.error {
        Some(error) if !result.success => {
            let mut message = error.message.clone();
            if let Some(fields) = &error.fields {
                message = format!("{message} ({fields})");
            }
            anyhow::bail!("{}: {message}", error.kind)
        }
        _ => Ok(()),
    }
}

fn render_table(value: Value) -> anyhow::Result<String> {
    match value {
        Value::Array(items) => Ok(render_array_table(&items)),
        // Pages render their items with a summary line.
        Value::Object(map) if map.get("items").is_some_and(Value::is_array) => {
            let total = map.get("total").and_then(Value::as_u64).unwrap_or(0);
            let items = map.get("items").and_then(Value::as_array).map_or(&[][..], Vec::as_slice);
            Ok(format!(
                "{}\n({} of {total})",
                render_array_table(items),
                items.len()
            ))
        }
        Value::Object(map) => {
            let headers = ["key", "value"];
            let mut entries = map.into_iter().collect::<Vec<_>>();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let rows = entries
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&headers, &rows, options()))
        }
        scalar => {
            let headers = ["value"];
            let rows = vec![vec![value_to_cell(&scalar)]];
            Ok(table::render_entity_table(&headers, &rows, options()))
        }
    }
}

fn options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let headers = ["value"];
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&headers, &rows, options());
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    // `id` first, then key order.
    if let Some(pos) = headers.iter().position(|header| header == "id") {
        let id = headers.remove(pos);
        headers.insert(0, id);
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| {
                    map.get(header)
                        .map_or_else(|| String::from("-"), value_to_cell)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, options())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use juris_core::errors::ActionError;
    use juris_core::responses::{ActionResult, EntityRef, Page};
    use serde::Serialize;
    use serde_json::json;

    use super::{render, report};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        id: &'static str,
        status: &'static str,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Example {
            id: "cli-1",
            status: "active",
        };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "cli-1");
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Example {
            id: "cli-1",
            status: "active",
        };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_for_object_is_key_value() {
        let out = render(&json!({ "id": "cli-1" }), OutputFormat::Table).expect("table");
        assert!(out.lines().next().is_some_and(|line| line.contains("key")));
        assert!(out.contains("cli-1"));
    }

    #[test]
    fn table_render_for_page_lists_items_and_total() {
        let page = Page {
            items: vec![
                Example {
                    id: "ddl-1",
                    status: "open",
                },
                Example {
                    id: "ddl-2",
                    status: "done",
                },
            ],
            total: 5,
            limit: 2,
            offset: 0,
        };
        let out = render(&page, OutputFormat::Table).expect("table");
        assert!(out.lines().next().is_some_and(|line| line.starts_with("id")));
        assert!(out.ends_with("(2 of 5)"));
    }

    #[test]
    fn failed_result_becomes_an_error() {
        let result: ActionResult<EntityRef> =
            ActionResult::fail(&ActionError::invalid("case_number", "must have 20 digits"));
        let error = report(&result, OutputFormat::Table).unwrap_err();
        let message = error.to_string();
        assert!(message.starts_with("validation"));
        assert!(message.contains("case_number"));
    }

    #[test]
    fn successful_result_reports_ok() {
        let result = ActionResult::ok(EntityRef::new("spc-1"));
        assert!(report(&result, OutputFormat::Raw).is_ok());
    }
}
