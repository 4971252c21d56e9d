//! UI strings
//!
//! Labels and messages are looked up by key through [`Translate`]. The
//! [`Catalog`] ships English text for every key the console uses; the
//! `[strings]` config table overrides individual entries. Unknown keys
//! translate to themselves, so literal text works wherever a key is expected.

pub mod countries;

use std::collections::{BTreeMap, HashMap};

pub trait Translate {
    fn translate(&self, key: &str) -> String;

    /// Language code such as `en` or `uk`
    fn locale(&self) -> &str;
}

/// Built-in English strings plus user overrides
#[derive(Debug, Clone)]
pub struct Catalog {
    locale: String,
    strings: HashMap<String, String>,
}

const BUILTIN: &[(&str, &str)] = &[
    // Tabs
    ("brands.title", "Brands"),
    ("categories.title", "Categories"),
    ("subcategories.title", "Subcategories"),
    ("sizes.title", "Sizes"),
    ("colors.title", "Colors"),
    ("managers.title", "Managers"),
    ("orders.title", "Orders"),
    ("products.title", "Products"),
    // Column headers
    ("field.name", "Name"),
    ("field.country", "Country"),
    ("field.name_uk", "Name (uk)"),
    ("field.name_en", "Name (en)"),
    ("field.target", "Target"),
    ("field.category", "Category"),
    ("field.size", "Size"),
    ("field.code", "Code"),
    ("field.hex", "Color"),
    ("field.email", "Email"),
    ("field.full_name", "Full name"),
    ("field.role", "Role"),
    ("field.order", "Order"),
    ("field.customer", "Customer"),
    ("field.amount", "Amount"),
    ("field.payment_method", "Payment"),
    ("field.status", "Status"),
    ("field.payment_status", "Paid"),
    ("field.order_date", "Date"),
    ("field.item_count", "Items"),
    ("field.customer_name", "Recipient"),
    ("field.address", "Address"),
    ("field.phone", "Phone"),
    ("field.product", "Product"),
    ("field.subcategory", "Subcategory"),
    ("field.price", "Price"),
    // Filter and form placeholders
    ("placeholder.name", "Name"),
    ("placeholder.country", "Select country"),
    ("placeholder.name_uk", "Name (uk)"),
    ("placeholder.name_en", "Name (en)"),
    ("placeholder.target", "Select target"),
    ("placeholder.category", "Select category"),
    ("placeholder.size", "Size"),
    ("placeholder.code", "Code"),
    ("placeholder.email", "Email"),
    ("placeholder.full_name", "Name"),
    ("placeholder.role", "Select role"),
    ("placeholder.status", "Select status"),
    // Option text
    ("target.women", "Women"),
    ("target.men", "Men"),
    ("target.kids", "Kids"),
    ("role.customer", "Customer"),
    ("role.manager", "Manager"),
    ("role.admin", "Admin"),
    ("payment.done", "Done"),
    ("payment.pending", "Pending"),
    ("status.order-placed", "Order placed"),
    ("status.ready-to-ship", "Ready to ship"),
    ("status.shipped", "Shipped"),
    ("status.delivered", "Delivered"),
    ("status.recieved", "Received"),
    ("status.return-requested", "Return requested"),
    ("status.returned", "Returned"),
    ("status.return-rejected", "Return rejected"),
    ("status.cancelled", "Cancelled"),
    // Table and form chrome
    ("table.actions", "Actions"),
    ("table.filter", "Filter"),
    ("table.update", "Update"),
    ("table.cancel", "Cancel"),
    ("table.remove", "Remove"),
    ("table.empty", "No rows"),
    ("form.title", "Add new"),
    ("form.add", "Add"),
    ("form.incomplete", "Fill in every field first"),
    ("form.sticky", "kept after adding"),
    ("pager.page", "Page"),
    // Notices
    ("notice.update-success", "Updated"),
    ("notice.remove-success", "Removed"),
    ("notice.add-success", "Added"),
    ("notice.copied", "Row copied to clipboard"),
    ("error.unexpected-error", "Unexpected error"),
    ("error.config", "Resource configuration error"),
    ("error.clipboard", "Clipboard unavailable"),
    // Status bar
    ("status.loading", "Loading..."),
    ("status.ready", "Ready"),
];

impl Catalog {
    pub fn new(locale: impl Into<String>, overrides: &BTreeMap<String, String>) -> Self {
        let mut strings: HashMap<String, String> = BUILTIN
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        strings.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self {
            locale: locale.into(),
            strings,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new("en", &BTreeMap::new())
    }
}

impl Translate for Catalog {
    fn translate(&self, key: &str) -> String {
        self.strings
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    fn locale(&self) -> &str {
        &self.locale
    }
}
