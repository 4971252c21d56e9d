//! Request bodies and response decoding
//!
//! Pure functions between [`Record`]s and the JSON the backend speaks, kept
//! apart from the HTTP client so they can be tested without a server.

use super::error::ApiError;
use crate::config::{Derive, OptionSource, ResourceConfig};
use crate::table::{Record, Row, SelectOption};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Parameters of one list request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub page: usize,
    pub results_on_page: usize,
    /// `(request parameter, value)` pairs, empty values included
    pub filters: Vec<(String, String)>,
    pub sort_field: String,
    pub sort_desc: bool,
}

/// One page of rows plus the total row count across all pages
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage {
    pub items: Vec<Record>,
    pub count: usize,
}

/// Response envelope shared by every endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl Envelope {
    pub(crate) fn into_payload(self) -> Result<Map<String, Value>, ApiError> {
        if self.success {
            Ok(self.rest)
        } else {
            Err(ApiError::rejected(self.message))
        }
    }
}

/// `new` + `name_uk` -> `newName_uk`; an empty prefix keeps the key
pub fn field_param(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        return key.to_string();
    }
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => format!("{prefix}{}{}", first.to_uppercase(), chars.as_str()),
        None => prefix.to_string(),
    }
}

pub fn list_body(resource: &ResourceConfig, query: &ListQuery) -> Value {
    let mut body = Map::new();
    if resource.paginated {
        body.insert("page".into(), json!(query.page));
        body.insert("resultsOnPage".into(), json!(query.results_on_page));
    }
    for (param, value) in &query.filters {
        body.insert(param.clone(), Value::String(value.clone()));
    }
    body.insert("sortField".into(), json!(query.sort_field));
    body.insert("sortDesc".into(), json!(query.sort_desc));
    Value::Object(body)
}

/// Identifier plus every editable field of the edited row
pub fn update_body(resource: &ResourceConfig, row: &Record) -> Value {
    let mut body = Map::new();
    body.insert(resource.id_param.clone(), json!(row.id()));
    for field in resource.fields.iter().filter(|f| f.editable) {
        body.insert(
            field_param(&resource.field_prefix, &field.key),
            Value::String(row.text(&field.key).into_owned()),
        );
    }
    Value::Object(body)
}

pub fn remove_body(id: &str) -> Value {
    json!({ "id": id })
}

/// New record with an empty `_id`, wrapped when the resource says so
pub fn add_body(resource: &ResourceConfig, row: &Record) -> Value {
    let mut record = Map::new();
    record.insert(resource.id_key.clone(), json!(""));
    for field in resource.form_fields() {
        record.insert(
            field.key.clone(),
            Value::String(row.text(&field.key).into_owned()),
        );
    }
    match &resource.add_wrapper {
        Some(wrapper) => {
            let mut body = Map::new();
            body.insert(wrapper.clone(), Value::Object(record));
            Value::Object(body)
        }
        None => Value::Object(record),
    }
}

/// Fill derived fields on a raw item
pub fn apply_derived(resource: &ResourceConfig, locale: &str, item: &mut Map<String, Value>) {
    for field in &resource.fields {
        let Some(derive) = &field.derive else {
            continue;
        };
        let value = derive_value(derive, locale, item);
        item.insert(field.key.clone(), value);
    }
}

fn derive_value(derive: &Derive, locale: &str, item: &Map<String, Value>) -> Value {
    match derive {
        Derive::Join { paths, separator } => Value::String(
            paths
                .iter()
                .filter_map(|p| lookup(item, p).and_then(scalar_text))
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(separator.as_str()),
        ),
        Derive::Flag { path, on, off } => {
            let set = lookup(item, path).and_then(Value::as_bool).unwrap_or(false);
            Value::String(if set { on.clone() } else { off.clone() })
        }
        Derive::Date { path } => {
            Value::String(lookup(item, path).and_then(format_date).unwrap_or_default())
        }
        Derive::Count { path } => match lookup(item, path) {
            Some(Value::Array(items)) => json!(items.len()),
            _ => Value::String(String::new()),
        },
        Derive::Localized { path } => Value::String(
            lookup(item, &path.replace("{locale}", locale))
                .and_then(scalar_text)
                .unwrap_or_default(),
        ),
    }
}

/// `a.b.c` into nested objects
fn lookup<'a>(item: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let first = item.get(parts.next()?)?;
    parts.try_fold(first, |value, part| value.get(part))
}

/// Millisecond timestamps or RFC 3339 strings as `YYYY-MM-DD`
fn format_date(value: &Value) -> Option<String> {
    let date = match value {
        Value::Number(n) => DateTime::<Utc>::from_timestamp_millis(n.as_i64()?)?,
        Value::String(s) => DateTime::parse_from_rfc3339(s).ok()?.with_timezone(&Utc),
        _ => return None,
    };
    Some(date.format("%Y-%m-%d").to_string())
}

pub fn parse_list(
    resource: &ResourceConfig,
    locale: &str,
    mut payload: Map<String, Value>,
) -> Result<ListPage, ApiError> {
    let items = match payload.remove(&resource.items_key) {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            return Err(ApiError::Decode(format!(
                "`{}` is not a list: {}",
                resource.items_key, other
            )))
        }
    };

    let total = items.len();
    let records: Vec<Record> = items
        .into_iter()
        .filter_map(|item| {
            let Value::Object(mut map) = item else {
                return None;
            };
            apply_derived(resource, locale, &mut map);
            Record::from_json(Value::Object(map), &resource.id_key)
        })
        .collect();
    if records.len() < total {
        tracing::warn!(
            resource = %resource.name,
            skipped = total - records.len(),
            "Rows without `{}` skipped",
            resource.id_key
        );
    }

    let count = payload
        .get("count")
        .and_then(Value::as_u64)
        .map(|c| c as usize)
        .unwrap_or(records.len());

    Ok(ListPage {
        items: records,
        count,
    })
}

/// Options built from another list, sorted by text
pub fn parse_options(
    source: &OptionSource,
    locale: &str,
    mut payload: Map<String, Value>,
) -> Result<Vec<SelectOption>, ApiError> {
    let Some(Value::Array(items)) = payload.remove(&source.items_key) else {
        return Err(ApiError::Decode(format!(
            "`{}` missing from {}",
            source.items_key, source.path
        )));
    };
    let text_key = source.text_key.replace("{locale}", locale);

    let mut options: Vec<SelectOption> = items
        .iter()
        .filter_map(|item| {
            let value = scalar_text(item.get(&source.value_key)?)?;
            let text = item
                .get(&text_key)
                .and_then(scalar_text)
                .unwrap_or_else(|| value.clone());
            Some(SelectOption::new(value, text))
        })
        .collect();
    SelectOption::sort_by_text(&mut options);
    Ok(options)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_resources, resources::find};

    fn resource(name: &str) -> ResourceConfig {
        find(&default_resources(), name).unwrap().clone()
    }

    fn record(value: Value) -> Record {
        Record::from_json(value, "_id").unwrap()
    }

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("object expected"),
        }
    }

    #[test]
    fn field_param_capitalizes_after_prefix() {
        assert_eq!(field_param("new", "name_uk"), "newName_uk");
        assert_eq!(field_param("target", "role"), "targetRole");
        assert_eq!(field_param("", "status"), "status");
    }

    #[test]
    fn update_body_covers_editable_fields_only() {
        let colors = resource("colors");
        let row = record(json!({
            "_id": "c1", "code": "RED", "name_uk": "Червоний", "name_en": "Red", "hex": "#ff0000"
        }));
        assert_eq!(
            update_body(&colors, &row),
            json!({ "id": "c1", "newName_uk": "Червоний", "newName_en": "Red", "newHex": "#ff0000" })
        );

        let managers = resource("managers");
        let row = record(json!({ "_id": "u1", "email": "a@b.c", "role": "admin" }));
        assert_eq!(
            update_body(&managers, &row),
            json!({ "targetId": "u1", "targetRole": "admin" })
        );

        let orders = resource("orders");
        let row = record(json!({ "_id": "o1", "status": "shipped", "amount": 10 }));
        assert_eq!(
            update_body(&orders, &row),
            json!({ "orderId": "o1", "status": "shipped" })
        );
    }

    #[test]
    fn add_body_wraps_form_fields() {
        let brands = resource("brands");
        let row = record(json!({ "_id": "", "name": "Acme", "country": "UA" }));
        assert_eq!(
            add_body(&brands, &row),
            json!({ "brand": { "_id": "", "name": "Acme", "country": "UA" } })
        );
    }

    #[test]
    fn list_body_includes_paging_for_paginated_resources() {
        let query = ListQuery {
            page: 2,
            results_on_page: 20,
            filters: vec![("name".into(), "red".into()), ("country".into(), "".into())],
            sort_field: "name".into(),
            sort_desc: true,
        };
        assert_eq!(
            list_body(&resource("brands"), &query),
            json!({
                "page": 2, "resultsOnPage": 20, "name": "red", "country": "",
                "sortField": "name", "sortDesc": true
            })
        );
        let orders = list_body(&resource("orders"), &query);
        assert!(orders.get("page").is_none());
    }

    #[test]
    fn parse_list_computes_full_name() {
        let managers = resource("managers");
        let page = parse_list(
            &managers,
            "en",
            payload(json!({
                "managers": [
                    { "_id": "1", "firstName": "Taras", "lastName": "Shevchenko", "patronymic": "H" },
                    { "_id": "2", "firstName": "Lesia", "lastName": "Ukrainka" },
                    { "firstName": "No", "lastName": "Id" }
                ],
                "count": 42
            })),
        )
        .unwrap();
        assert_eq!(page.count, 42);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].text("fullName"), "Shevchenko Taras H");
        assert_eq!(page.items[1].text("fullName"), "Ukrainka Lesia");
    }

    #[test]
    fn parse_list_derives_order_columns() {
        let orders = resource("orders");
        let page = parse_list(
            &orders,
            "en",
            payload(json!({
                "orders": [
                    {
                        "_id": "o1",
                        "payment": true,
                        "createdAt": 1_717_243_200_000_i64,
                        "items": [{ "size": "M" }, { "size": "L" }, { "size": "S" }],
                        "address": {
                            "firstName": "Olena", "lastName": "Koval",
                            "street": "Khreshchatyk 1", "city": "Kyiv",
                            "region": "Kyivska", "zipcode": 1001, "phone": "+380501234567"
                        }
                    },
                    { "_id": "o2", "payment": false, "createdAt": "2024-03-05T10:00:00Z" },
                    { "_id": "o3" }
                ]
            })),
        )
        .unwrap();
        let paid = &page.items[0];
        assert_eq!(paid.text("paymentStatus"), "done");
        assert_eq!(paid.text("orderDate"), "2024-06-01");
        assert_eq!(paid.text("itemCount"), "3");
        assert_eq!(paid.text("customerName"), "Olena Koval");
        assert_eq!(paid.text("address"), "Khreshchatyk 1, Kyiv, Kyivska, 1001");
        assert_eq!(paid.text("phone"), "+380501234567");

        let pending = &page.items[1];
        assert_eq!(pending.text("paymentStatus"), "pending");
        assert_eq!(pending.text("orderDate"), "2024-03-05");
        assert_eq!(pending.text("address"), "");

        let bare = &page.items[2];
        assert_eq!(bare.text("paymentStatus"), "pending");
        assert_eq!(bare.text("orderDate"), "");
        assert_eq!(bare.text("itemCount"), "");
    }

    #[test]
    fn parse_list_localizes_product_names() {
        let products = resource("products");
        let body = json!({
            "products": [
                { "_id": "p1", "name_uk": "Сукня", "name_en": "Dress", "subcategoryId": "s1", "price": 1200 }
            ]
        });
        let uk = parse_list(&products, "uk", payload(body.clone())).unwrap();
        assert_eq!(uk.items[0].text("name"), "Сукня");
        assert_eq!(uk.items[0].text("price"), "1200");
        let en = parse_list(&products, "en", payload(body)).unwrap();
        assert_eq!(en.items[0].text("name"), "Dress");
        assert_eq!(en.count, 1);
    }

    #[test]
    fn parse_list_rejects_non_list_items() {
        let err = parse_list(&resource("brands"), "en", payload(json!({ "brands": "oops" })))
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));

        let empty = parse_list(&resource("brands"), "en", payload(json!({}))).unwrap();
        assert_eq!(empty, ListPage { items: Vec::new(), count: 0 });
    }

    #[test]
    fn options_use_locale_text_and_sort() {
        let source = resource("sizes").fields[1].options_from.clone().unwrap();
        let options = parse_options(
            &source,
            "uk",
            payload(json!({
                "categories": [
                    { "_id": "b", "name_uk": "Сукні", "name_en": "Dresses" },
                    { "_id": "a", "name_uk": "Взуття", "name_en": "Shoes" }
                ]
            })),
        )
        .unwrap();
        assert_eq!(
            options,
            vec![
                SelectOption::new("a", "Взуття"),
                SelectOption::new("b", "Сукні")
            ]
        );
    }

    #[test]
    fn rejected_envelope_carries_message() {
        let envelope: Envelope =
            serde_json::from_value(json!({ "success": false, "message": "Brand exists" })).unwrap();
        assert!(matches!(envelope.into_payload(), Err(ApiError::Rejected(m)) if m == "Brand exists"));

        let envelope: Envelope = serde_json::from_value(json!({ "success": false })).unwrap();
        assert!(matches!(envelope.into_payload(), Err(ApiError::Rejected(m)) if m == "error.unexpected-error"));
    }
}
