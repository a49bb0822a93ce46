//! RPC method handler for the linkshelf JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches a method call to the collection store,
//! settings engine and selection held by the `App`.

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::Utc;
use serde_json::{json, Value};

use crate::app::App;
use crate::managers::collection_store::{BulkAction, CollectionStoreTrait, Confirmation};
use crate::managers::selection::SelectionTrait;
use crate::services::duplicate_detector::DuplicatePair;
use crate::services::input_normalizer;
use crate::services::link_query::{self, GroupFilter, LinkQuery, SortOrder};
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::backup::ImportDocument;

/// Reads `params.ids` as a set, or the current selection when absent.
fn ids_param(app: &App, params: &Value) -> Result<HashSet<String>, String> {
    match params.get("ids") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| v.as_str().map(str::to_string).ok_or_else(|| "ids must be strings".to_string()))
            .collect(),
        Some(_) => Err("ids must be an array".to_string()),
        None => Ok(app.selection.ids().clone()),
    }
}

fn confirmed_param(params: &Value) -> bool {
    params.get("confirm").and_then(|v| v.as_bool()).unwrap_or(false)
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        // ─── Links ───
        "links.add" => {
            let text = params.get("text").and_then(|v| v.as_str()).ok_or("missing text")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let group = params
                .get("group_id")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| a.current_group.clone());
            let ids = a.store.add_links(text, &group).map_err(|e| e.to_string())?;
            Ok(json!({"added": ids.len(), "ids": ids}))
        }
        "links.list" => {
            let sort = match params.get("sort").and_then(|v| v.as_str()) {
                Some(s) => SortOrder::parse(s).ok_or_else(|| format!("unknown sort order: {}", s))?,
                None => SortOrder::default(),
            };
            let query = LinkQuery {
                search: params.get("search").and_then(|v| v.as_str()).unwrap_or("").to_string(),
                group: GroupFilter::parse(params.get("group").and_then(|v| v.as_str()).unwrap_or("all")),
                sort,
            };
            let a = app.lock().map_err(|e| e.to_string())?;
            let links = link_query::snapshot(a.store.links(), &query);
            serde_json::to_value(links).map_err(|e| e.to_string())
        }
        "links.move" => {
            let target = params.get("group_id").and_then(|v| v.as_str()).ok_or("missing group_id")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let ids = ids_param(&a, params)?;
            let moved = a.store.move_links(&ids, target).map_err(|e| e.to_string())?;
            if moved > 0 {
                a.selection.clear();
            }
            Ok(json!({"moved": moved}))
        }
        "links.delete" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let ids = ids_param(&a, params)?;
            let confirm = a.confirmation(confirmed_param(params));
            let deleted = a.store.delete_links(&ids, confirm).map_err(|e| e.to_string())?;
            a.prune_selection();
            Ok(json!({"deleted": deleted}))
        }
        "links.delete_all" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let confirm = a.confirmation(confirmed_param(params));
            let deleted = a.store.delete_all(confirm).map_err(|e| e.to_string())?;
            a.selection.clear();
            Ok(json!({"deleted": deleted}))
        }
        "links.auto_group" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let ids = ids_param(&a, params)?;
            let changed = a.store.auto_group_links(&ids);
            Ok(json!({"changed": changed}))
        }
        "links.bulk" => {
            let action = match params.get("action").and_then(|v| v.as_str()) {
                Some("") | None => None,
                Some(s) => Some(BulkAction::parse(s).ok_or_else(|| format!("unknown bulk action: {}", s))?),
            };
            let target = params.get("group_id").and_then(|v| v.as_str());
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let ids = ids_param(&a, params)?;
            let confirm = a.confirmation(confirmed_param(params));
            let changed = a
                .store
                .bulk_apply(action, &ids, target, confirm)
                .map_err(|e| e.to_string())?;
            a.selection.clear();
            Ok(json!({"changed": changed}))
        }
        "links.duplicates" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.store.duplicate_report()).map_err(|e| e.to_string())
        }
        "links.remove_duplicates" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let pairs: Vec<DuplicatePair> = a.store.find_duplicates();
            let confirm = a.confirmation(confirmed_param(params));
            let removed = a.store.remove_duplicates(&pairs, confirm).map_err(|e| e.to_string())?;
            a.selection.clear();
            Ok(json!({"found": pairs.len(), "removed": removed}))
        }
        "links.auto_format" => {
            let text = params.get("text").and_then(|v| v.as_str()).ok_or("missing text")?;
            Ok(json!({"text": input_normalizer::auto_format_block(text)}))
        }
        "links.favicon" => {
            let domain = params.get("domain").and_then(|v| v.as_str()).ok_or("missing domain")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let settings = a.settings_engine.get_settings();
            if !settings.show_favicons {
                return Ok(json!({"url": null}));
            }
            Ok(json!({"url": link_query::favicon_url(domain, settings.favicon_size)}))
        }
        "links.open" => {
            let id = params.get("id").and_then(|v| v.as_str()).ok_or("missing id")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let url = a
                .store
                .link(id)
                .map(|l| l.url.clone())
                .ok_or_else(|| format!("Link not found: {}", id))?;
            // Removal on open never prompts.
            let removed = if a.settings_engine.get_settings().remove_after_open {
                let removed = a.store.delete_link(id, Confirmation::Confirmed).map_err(|e| e.to_string())?;
                a.prune_selection();
                removed
            } else {
                false
            };
            Ok(json!({"url": url, "removed": removed}))
        }

        // ─── Groups ───
        "groups.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.store.groups()).map_err(|e| e.to_string())
        }
        "groups.create" => {
            let name = params.get("name").and_then(|v| v.as_str()).ok_or("missing name")?;
            let color = params.get("color").and_then(|v| v.as_str());
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let id = a.store.create_group(name, color).map_err(|e| e.to_string())?;
            Ok(json!({"id": id}))
        }
        "groups.select" => {
            let id = params.get("id").and_then(|v| v.as_str()).ok_or("missing id")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            if !a.set_current_group(id) {
                return Err(format!("Group not found: {}", id));
            }
            Ok(json!({"ok": true}))
        }

        // ─── Backup ───
        "backup.export" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let text = a.store.export_json().map_err(|e| e.to_string())?;
            Ok(json!({"document": text}))
        }
        "backup.import" => {
            let doc = match params.get("document") {
                Some(Value::String(text)) => ImportDocument::from_json(text),
                Some(value) => ImportDocument::from_value(value.clone()),
                None => return Err("missing document".to_string()),
            }
            .map_err(|e| e.to_string())?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let summary = a.store.merge_import(doc);
            serde_json::to_value(summary).map_err(|e| e.to_string())
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.settings_engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = params.get("key").and_then(|v| v.as_str()).ok_or("missing key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            a.apply_settings();
            Ok(json!({"ok": true}))
        }
        "settings.reset" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.settings_engine.reset().map_err(|e| e.to_string())?;
            a.apply_settings();
            Ok(json!({"ok": true}))
        }

        // ─── Selection ───
        "selection.toggle" => {
            let id = params.get("id").and_then(|v| v.as_str()).ok_or("missing id")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let selected = a.selection.toggle(id);
            Ok(json!({"selected": selected, "count": a.selection.len()}))
        }
        "selection.clear" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.selection.clear();
            Ok(json!({"ok": true}))
        }
        "selection.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut ids: Vec<&String> = a.selection.ids().iter().collect();
            ids.sort();
            Ok(json!(ids))
        }

        // ─── Statistics ───
        "stats.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let stats = link_query::statistics(a.store.links(), a.store.groups().len(), Utc::now());
            serde_json::to_value(stats).map_err(|e| e.to_string())
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
