//! Inline style declarations
//!
//! Properties are keyed by their CSSOM (camelCase) name, the same names
//! script code uses on `element.style`: `borderBottom`, `webkitTransform`,
//! `MozTransform`. CSS text (`border-bottom: 1px`) is converted on the way in
//! and out.

/// Vendor spellings: (CSSOM prefix, CSS prefix)
const VENDOR_SPELLINGS: &[(&str, &str)] = &[
    ("webkit", "-webkit-"),
    ("Webkit", "-webkit-"),
    ("Moz", "-moz-"),
    ("ms", "-ms-"),
    ("O", "-o-"),
];

/// Convert a CSS property name to its CSSOM name (`-moz-transform` -> `MozTransform`)
pub fn css_to_property_name(name: &str) -> String {
    let name = name.trim();
    if !name.contains('-') {
        return name.to_string();
    }
    for (cssom, css) in VENDOR_SPELLINGS {
        if let Some(rest) = name.strip_prefix(css) {
            let camel = crate::to_camel_case(rest);
            let mut chars = camel.chars();
            let capitalized: String = match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            };
            return format!("{cssom}{capitalized}");
        }
    }
    crate::to_camel_case(name)
}

/// Convert a CSSOM property name to its CSS name (`webkitTransform` -> `-webkit-transform`)
pub fn property_to_css_name(name: &str) -> String {
    for (cssom, css) in VENDOR_SPELLINGS {
        if let Some(rest) = name.strip_prefix(cssom) {
            if rest.starts_with(|c: char| c.is_ascii_uppercase()) {
                let mut chars = rest.chars();
                let lowered = match chars.next() {
                    Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
                    None => String::new(),
                };
                return format!("{css}{}", crate::to_kebab_case(&lowered));
            }
        }
    }
    crate::to_kebab_case(name)
}

/// Ordered inline style declaration block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDeclaration {
    properties: Vec<(String, String)>,
}

impl StyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `style` attribute value
    pub fn parse(css_text: &str) -> Self {
        let mut decl = Self::new();
        for item in css_text.split(';') {
            let Some((name, value)) = item.split_once(':') else {
                continue;
            };
            let value = value.trim();
            let value = value.strip_suffix("!important").map(str::trim_end).unwrap_or(value);
            decl.set_property(name, value);
        }
        decl
    }

    /// Get a property by CSSOM or CSS name
    pub fn get_property(&self, name: &str) -> Option<&str> {
        let name = css_to_property_name(name);
        self.properties
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set a property; an empty value removes it
    pub fn set_property(&mut self, name: &str, value: &str) {
        let name = css_to_property_name(name);
        if name.is_empty() {
            return;
        }
        let value = value.trim();
        if value.is_empty() {
            self.properties.retain(|(k, _)| *k != name);
            return;
        }
        match self.properties.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value.to_string(),
            None => self.properties.push((name, value.to_string())),
        }
    }

    pub fn remove_property(&mut self, name: &str) -> Option<String> {
        let name = css_to_property_name(name);
        let index = self.properties.iter().position(|(k, _)| *k == name)?;
        Some(self.properties.remove(index).1)
    }

    pub fn length(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterate `(cssom_name, value)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize back to CSS text
    pub fn css_text(&self) -> String {
        self.properties
            .iter()
            .map(|(k, v)| format!("{}: {};", property_to_css_name(k), v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_conversion() {
        assert_eq!(css_to_property_name("border-bottom"), "borderBottom");
        assert_eq!(css_to_property_name("-webkit-transform"), "webkitTransform");
        assert_eq!(css_to_property_name("-moz-transform-origin"), "MozTransformOrigin");
        assert_eq!(css_to_property_name("-ms-transform"), "msTransform");
        assert_eq!(css_to_property_name("-o-transition"), "OTransition");
        assert_eq!(css_to_property_name("color"), "color");

        assert_eq!(property_to_css_name("borderBottom"), "border-bottom");
        assert_eq!(property_to_css_name("webkitTransform"), "-webkit-transform");
        assert_eq!(property_to_css_name("MozTransform"), "-moz-transform");
        assert_eq!(property_to_css_name("OTransitionDuration"), "-o-transition-duration");
        assert_eq!(property_to_css_name("msTransform"), "-ms-transform");
    }

    #[test]
    fn test_parse_and_serialize() {
        let decl = StyleDeclaration::parse("color: red; border-bottom: 2px solid #CCC ; display:none !important");
        assert_eq!(decl.length(), 3);
        assert_eq!(decl.get_property("borderBottom"), Some("2px solid #CCC"));
        assert_eq!(decl.get_property("display"), Some("none"));
        assert_eq!(
            decl.css_text(),
            "color: red; border-bottom: 2px solid #CCC; display: none;"
        );
    }

    #[test]
    fn test_empty_value_removes() {
        let mut decl = StyleDeclaration::parse("color: red");
        decl.set_property("color", "");
        assert!(decl.is_empty());
    }
}
