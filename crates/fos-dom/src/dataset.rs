//! DOMStringMap (dataset) name mapping
//!
//! `data-user-id` is exposed as `userId`. Storage stays in the element's
//! attributes; these helpers translate between the two spellings.

/// Convert a dataset key to its attribute name (`userName` -> `data-user-name`)
pub fn to_attribute_name(key: &str) -> String {
    format!("data-{}", to_kebab_case(key))
}

/// Convert an attribute name to its dataset key, if it is a `data-*` attribute
pub fn to_dataset_key(attr_name: &str) -> Option<String> {
    attr_name.strip_prefix("data-").map(to_camel_case)
}

/// Convert kebab-case to camelCase
pub fn to_camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = false;

    for c in s.chars() {
        if c == '-' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Convert camelCase to kebab-case
pub fn to_kebab_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);

    for c in s.chars() {
        if c.is_ascii_uppercase() {
            result.push('-');
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }

    result
}
