//! Resource schemas
//!
//! Every tab in the console is described by a [`ResourceConfig`]: backend
//! paths, the JSON keys it reads, and the columns it shows. The catalog
//! entities ship as [`default_resources`]; a `[[resources]]` list in the
//! config file replaces them wholesale.

use crate::table::SelectOption;
use serde::{Deserialize, Serialize};

/// Rendering kind as written in config
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindName {
    #[default]
    Text,
    Select,
    Color,
}

/// Built-in option lists for select columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionList {
    /// ISO 3166 countries named in the configured locale
    Countries,
}

/// How a read-only column is computed from the raw record. Paths may be
/// dotted to reach into nested objects (`address.city`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "from", rename_all = "lowercase")]
pub enum Derive {
    /// Non-empty values at `paths` joined with `separator`
    Join {
        paths: Vec<String>,
        #[serde(default = "default_separator")]
        separator: String,
    },
    /// `on` when the boolean at `path` is true, `off` otherwise
    Flag { path: String, on: String, off: String },
    /// Millisecond timestamp at `path` as `YYYY-MM-DD` (UTC)
    Date { path: String },
    /// Length of the list at `path`
    Count { path: String },
    /// Value at `path` after `{locale}` substitution, e.g. `name_{locale}`
    Localized { path: String },
}

impl Derive {
    fn join(paths: &[&str], separator: &str) -> Self {
        Self::Join {
            paths: paths.iter().map(|p| p.to_string()).collect(),
            separator: separator.to_string(),
        }
    }
}

/// Select options loaded from another list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSource {
    pub path: String,
    pub items_key: String,
    #[serde(default = "default_id_key")]
    pub value_key: String,
    /// Key holding the option text; `{locale}` is substituted
    pub text_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub key: String,
    /// Translation key of the column header
    pub label: String,
    /// Translation key of the filter / form placeholder
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub placeholder: String,
    #[serde(default)]
    pub kind: KindName,
    #[serde(default = "default_true")]
    pub editable: bool,
    /// Keep the add-form value after a successful add
    #[serde(default, skip_serializing_if = "is_false")]
    pub sticky: bool,
    /// Show in the add form
    #[serde(default = "default_true")]
    pub in_form: bool,
    /// Request parameter name when filtering, if it differs from `key`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_param: Option<String>,
    /// Computed from other keys of the raw record on every list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derive: Option<Derive>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options_from: Option<OptionSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_list: Option<OptionList>,
    /// Static options; option text is a translation key
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

impl FieldConfig {
    fn new(key: &str, label: &str, kind: KindName) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            placeholder: String::new(),
            kind,
            editable: true,
            sticky: false,
            in_form: true,
            filter_param: None,
            derive: None,
            options_from: None,
            option_list: None,
            options: Vec::new(),
        }
    }

    fn text(key: &str, label: &str) -> Self {
        Self::new(key, label, KindName::Text)
    }

    fn select(key: &str, label: &str, options: Vec<SelectOption>) -> Self {
        Self {
            options,
            ..Self::new(key, label, KindName::Select)
        }
    }

    fn placeholder(mut self, key: &str) -> Self {
        self.placeholder = key.to_string();
        self
    }

    fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    fn sticky(mut self) -> Self {
        self.sticky = true;
        self
    }

    fn table_only(mut self) -> Self {
        self.in_form = false;
        self
    }

    fn options_from(mut self, source: OptionSource) -> Self {
        self.options_from = Some(source);
        self
    }

    fn option_list(mut self, list: OptionList) -> Self {
        self.option_list = Some(list);
        self
    }

    /// Read-only table column computed by `derive`
    fn derived(mut self, derive: Derive) -> Self {
        self.derive = Some(derive);
        self.read_only().table_only()
    }

    /// Parameter name used in list requests
    pub fn filter_param(&self) -> &str {
        self.filter_param.as_deref().unwrap_or(&self.key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Tab identifier, also used by `catalog-admin list <name>`
    pub name: String,
    /// Translation key of the tab title
    pub title: String,
    pub list_path: String,
    /// Response key holding the rows
    pub items_key: String,
    #[serde(default = "default_id_key")]
    pub id_key: String,
    #[serde(default = "default_true")]
    pub paginated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_path: Option<String>,
    /// Request key carrying the identifier in update bodies
    #[serde(default = "default_id_param")]
    pub id_param: String,
    /// Prefix for updated field names: `new` + `name` -> `newName`
    #[serde(default)]
    pub field_prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_path: Option<String>,
    /// Key wrapping the new record in add bodies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_wrapper: Option<String>,
    pub fields: Vec<FieldConfig>,
}

impl ResourceConfig {
    fn new(name: &str, list_path: &str, items_key: &str, fields: Vec<FieldConfig>) -> Self {
        Self {
            name: name.to_string(),
            title: format!("{name}.title"),
            list_path: list_path.to_string(),
            items_key: items_key.to_string(),
            id_key: default_id_key(),
            paginated: true,
            update_path: None,
            id_param: default_id_param(),
            field_prefix: String::new(),
            remove_path: None,
            add_path: None,
            add_wrapper: None,
            fields,
        }
    }

    /// `<base>update`, `<base>remove` and `<base>add` with `new` prefixed
    /// field names, the layout shared by the catalog endpoints
    fn crud(mut self, base: &str, wrapper: &str) -> Self {
        self.update_path = Some(format!("{base}update"));
        self.remove_path = Some(format!("{base}remove"));
        self.add_path = Some(format!("{base}add"));
        self.add_wrapper = Some(wrapper.to_string());
        self.field_prefix = "new".to_string();
        self
    }

    pub fn field(&self, key: &str) -> Option<&FieldConfig> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn form_fields(&self) -> impl Iterator<Item = &FieldConfig> {
        self.fields.iter().filter(|f| f.in_form)
    }

    pub fn has_add(&self) -> bool {
        self.add_path.is_some() && self.form_fields().next().is_some()
    }

    /// Fields whose options come from another endpoint
    pub fn option_sources(&self) -> impl Iterator<Item = (&str, &OptionSource)> {
        self.fields
            .iter()
            .filter_map(|f| f.options_from.as_ref().map(|s| (f.key.as_str(), s)))
    }
}

/// Look up a resource by tab name
pub fn find<'a>(resources: &'a [ResourceConfig], name: &str) -> Option<&'a ResourceConfig> {
    resources.iter().find(|r| r.name == name)
}

fn default_true() -> bool {
    true
}

fn is_false(v: &bool) -> bool {
    !*v
}

fn default_id_key() -> String {
    "_id".to_string()
}

fn default_id_param() -> String {
    "id".to_string()
}

fn default_separator() -> String {
    " ".to_string()
}

fn named_source(path: &str, items_key: &str) -> OptionSource {
    OptionSource {
        path: path.to_string(),
        items_key: items_key.to_string(),
        value_key: default_id_key(),
        text_key: "name_{locale}".to_string(),
    }
}

fn categories_source() -> OptionSource {
    named_source("/api/category/", "categories")
}

fn subcategories_source() -> OptionSource {
    named_source("/api/subcategory/", "subcategories")
}

fn options(keys: &[(&str, &str)]) -> Vec<SelectOption> {
    keys.iter().map(|(v, t)| SelectOption::new(*v, *t)).collect()
}

/// Catalog entities of the storefront backend
pub fn default_resources() -> Vec<ResourceConfig> {
    let brands = ResourceConfig::new(
        "brands",
        "/api/brand/",
        "brands",
        vec![
            FieldConfig::text("name", "field.name").placeholder("placeholder.name"),
            FieldConfig::select("country", "field.country", Vec::new())
                .option_list(OptionList::Countries)
                .placeholder("placeholder.country")
                .sticky(),
        ],
    )
    .crud("/api/brand/", "brand");

    let categories = ResourceConfig::new(
        "categories",
        "/api/category/",
        "categories",
        vec![
            FieldConfig::text("name_uk", "field.name_uk").placeholder("placeholder.name_uk"),
            FieldConfig::text("name_en", "field.name_en").placeholder("placeholder.name_en"),
            FieldConfig::select(
                "target",
                "field.target",
                options(&[
                    ("women", "target.women"),
                    ("men", "target.men"),
                    ("kids", "target.kids"),
                ]),
            )
            .placeholder("placeholder.target")
            .sticky(),
        ],
    )
    .crud("/api/category/", "category");

    let subcategories = ResourceConfig::new(
        "subcategories",
        "/api/subcategory/",
        "subcategories",
        vec![
            FieldConfig::text("name_uk", "field.name_uk").placeholder("placeholder.name_uk"),
            FieldConfig::text("name_en", "field.name_en").placeholder("placeholder.name_en"),
            FieldConfig::select("categoryId", "field.category", Vec::new())
                .options_from(categories_source())
                .placeholder("placeholder.category")
                .sticky(),
        ],
    )
    .crud("/api/subcategory/", "subcategory");

    let sizes = ResourceConfig::new(
        "sizes",
        "/api/size/",
        "sizes",
        vec![
            FieldConfig::text("size", "field.size").placeholder("placeholder.size"),
            FieldConfig::select("categoryId", "field.category", Vec::new())
                .options_from(categories_source())
                .placeholder("placeholder.category")
                .sticky(),
        ],
    )
    .crud("/api/size/", "size");

    let colors = ResourceConfig::new(
        "colors",
        "/api/color/",
        "colors",
        vec![
            FieldConfig::text("code", "field.code")
                .placeholder("placeholder.code")
                .read_only(),
            FieldConfig::text("name_uk", "field.name_uk").placeholder("placeholder.name_uk"),
            FieldConfig::text("name_en", "field.name_en").placeholder("placeholder.name_en"),
            FieldConfig::new("hex", "field.hex", KindName::Color).sticky(),
        ],
    )
    .crud("/api/color/", "color");

    let mut full_name = FieldConfig::text("fullName", "field.full_name")
        .placeholder("placeholder.full_name")
        .derived(Derive::join(&["lastName", "firstName", "patronymic"], " "));
    full_name.filter_param = Some("name".to_string());
    let mut managers = ResourceConfig::new(
        "managers",
        "/api/user/managers",
        "managers",
        vec![
            FieldConfig::text("email", "field.email")
                .placeholder("placeholder.email")
                .read_only()
                .table_only(),
            full_name,
            FieldConfig::select(
                "role",
                "field.role",
                options(&[
                    ("customer", "role.customer"),
                    ("manager", "role.manager"),
                    ("admin", "role.admin"),
                ]),
            )
            .placeholder("placeholder.role")
            .table_only(),
        ],
    );
    managers.update_path = Some("/api/user/changeRole".to_string());
    managers.id_param = "targetId".to_string();
    managers.field_prefix = "target".to_string();

    let mut orders = ResourceConfig::new(
        "orders",
        "/api/order/list",
        "orders",
        vec![
            FieldConfig::text("_id", "field.order").read_only().table_only(),
            FieldConfig::text("customerId", "field.customer")
                .read_only()
                .table_only(),
            FieldConfig::text("amount", "field.amount").read_only().table_only(),
            FieldConfig::text("paymentMethod", "field.payment_method")
                .read_only()
                .table_only(),
            FieldConfig::select(
                "paymentStatus",
                "field.payment_status",
                options(&[("done", "payment.done"), ("pending", "payment.pending")]),
            )
            .derived(Derive::Flag {
                path: "payment".to_string(),
                on: "done".to_string(),
                off: "pending".to_string(),
            }),
            FieldConfig::text("orderDate", "field.order_date").derived(Derive::Date {
                path: "createdAt".to_string(),
            }),
            FieldConfig::text("itemCount", "field.item_count").derived(Derive::Count {
                path: "items".to_string(),
            }),
            FieldConfig::text("customerName", "field.customer_name")
                .derived(Derive::join(&["address.firstName", "address.lastName"], " ")),
            FieldConfig::text("address", "field.address").derived(Derive::join(
                &[
                    "address.street",
                    "address.city",
                    "address.region",
                    "address.zipcode",
                ],
                ", ",
            )),
            FieldConfig::text("phone", "field.phone")
                .derived(Derive::join(&["address.phone"], " ")),
            FieldConfig::select(
                "status",
                "field.status",
                options(&[
                    ("order-placed", "status.order-placed"),
                    ("ready-to-ship", "status.ready-to-ship"),
                    ("shipped", "status.shipped"),
                    ("delivered", "status.delivered"),
                    ("recieved", "status.recieved"),
                    ("return-requested", "status.return-requested"),
                    ("returned", "status.returned"),
                    ("return-rejected", "status.return-rejected"),
                    ("cancelled", "status.cancelled"),
                ]),
            )
            .placeholder("placeholder.status")
            .table_only(),
        ],
    );
    orders.paginated = false;
    orders.update_path = Some("/api/order/status".to_string());
    orders.id_param = "orderId".to_string();

    let mut products = ResourceConfig::new(
        "products",
        "/api/product/list/",
        "products",
        vec![
            FieldConfig::text("_id", "field.product").read_only().table_only(),
            FieldConfig::text("name", "field.name").derived(Derive::Localized {
                path: "name_{locale}".to_string(),
            }),
            FieldConfig::select("subcategoryId", "field.subcategory", Vec::new())
                .options_from(subcategories_source())
                .read_only()
                .table_only(),
            FieldConfig::text("price", "field.price").read_only().table_only(),
        ],
    );
    products.paginated = false;
    products.remove_path = Some("/api/product/remove".to_string());

    vec![
        brands,
        categories,
        subcategories,
        sizes,
        colors,
        managers,
        orders,
        products,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_names_are_unique() {
        let resources = default_resources();
        let mut names: Vec<_> = resources.iter().map(|r| r.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), resources.len());
    }

    #[test]
    fn managers_are_update_only() {
        let resources = default_resources();
        let managers = find(&resources, "managers").unwrap();
        assert!(managers.remove_path.is_none());
        assert!(!managers.has_add());
        assert_eq!(managers.field("fullName").unwrap().filter_param(), "name");
        assert_eq!(managers.field("email").unwrap().filter_param(), "email");
    }

    #[test]
    fn color_code_is_read_only_but_in_form() {
        let resources = default_resources();
        let colors = find(&resources, "colors").unwrap();
        let code = colors.field("code").unwrap();
        assert!(!code.editable);
        assert!(code.in_form);
        assert!(colors.has_add());
        assert_eq!(colors.form_fields().count(), 4);
    }

    #[test]
    fn option_sources_listed() {
        let resources = default_resources();
        let sizes = find(&resources, "sizes").unwrap();
        let sources: Vec<_> = sizes.option_sources().map(|(k, _)| k).collect();
        assert_eq!(sources, vec!["categoryId"]);
        assert_eq!(find(&resources, "brands").unwrap().option_sources().count(), 0);
    }

    #[test]
    fn brand_countries_come_from_builtin_list() {
        let resources = default_resources();
        let country = find(&resources, "brands").unwrap().field("country").unwrap();
        assert_eq!(country.option_list, Some(OptionList::Countries));
        assert!(country.options.is_empty());
    }

    #[test]
    fn products_are_remove_only() {
        let resources = default_resources();
        let products = find(&resources, "products").unwrap();
        assert_eq!(products.list_path, "/api/product/list/");
        assert_eq!(products.items_key, "products");
        assert_eq!(products.remove_path.as_deref(), Some("/api/product/remove"));
        assert!(products.update_path.is_none());
        assert!(!products.has_add());
        assert!(!products.paginated);
        assert!(products.fields.iter().all(|f| !f.editable && !f.in_form));

        let sources: Vec<_> = products
            .option_sources()
            .map(|(k, s)| (k, s.path.as_str(), s.text_key.as_str()))
            .collect();
        assert_eq!(
            sources,
            vec![("subcategoryId", "/api/subcategory/", "name_{locale}")]
        );
        assert_eq!(
            products.field("name").unwrap().derive,
            Some(Derive::Localized {
                path: "name_{locale}".to_string()
            })
        );
    }

    #[test]
    fn order_columns_are_derived_and_read_only() {
        let resources = default_resources();
        let orders = find(&resources, "orders").unwrap();
        for key in [
            "paymentStatus",
            "orderDate",
            "itemCount",
            "customerName",
            "address",
            "phone",
        ] {
            let field = orders.field(key).unwrap();
            assert!(field.derive.is_some(), "{key}");
            assert!(!field.editable, "{key}");
        }
        let editable: Vec<_> = orders
            .fields
            .iter()
            .filter(|f| f.editable)
            .map(|f| f.key.as_str())
            .collect();
        assert_eq!(editable, vec!["status"]);
    }
}
