//! Vendor-prefix tables
//!
//! Style properties listed here are written under their canonical CSSOM name
//! and under every prefixed spelling (`webkitTransform`, `MozTransform`, ...).
//! Event names listed here subscribe every alias together.

/// Immutable vendor-prefix configuration
#[derive(Debug)]
pub struct VendorMap {
    /// CSSOM prefixes, prepended to the capitalized canonical name
    pub prefixes: &'static [&'static str],
    /// Canonical properties that fan out to every prefix
    pub properties: &'static [&'static str],
    /// Canonical event name and every event name subscribed with it
    pub events: &'static [(&'static str, &'static [&'static str])],
}

/// The table used unless a `QueryConfig` supplies another
pub static DEFAULT_VENDOR_MAP: VendorMap = VendorMap {
    prefixes: &["ms", "O", "webkit", "Moz"],
    properties: &[
        "animationName",
        "animationDelay",
        "animationDirection",
        "animationDuration",
        "animationFillMode",
        "animationIterationCount",
        "animationPlayState",
        "animationTimingFunction",
        "borderRadius",
        "transform",
        "transformOrigin",
        "transition",
        "transitionProperty",
        "transitionDuration",
        "transitionTimingFunction",
        "transitionDelay",
    ],
    events: &[
        (
            "transitionEnd",
            &[
                "transitionend",
                "webkitTransitionEnd",
                "MozTransitionEnd",
                "OTransitionEnd",
                "msTransitionEnd",
            ],
        ),
        (
            "animationEnd",
            &["animationend", "webkitAnimationEnd", "MozAnimationEnd", "OAnimationEnd", "MSAnimationEnd"],
        ),
        (
            "animationStart",
            &[
                "animationstart",
                "webkitAnimationStart",
                "MozAnimationStart",
                "OAnimationStart",
                "MSAnimationStart",
            ],
        ),
        (
            "animationIteration",
            &[
                "animationiteration",
                "webkitAnimationIteration",
                "MozAnimationIteration",
                "OAnimationIteration",
                "MSAnimationIteration",
            ],
        ),
    ],
};

impl VendorMap {
    pub fn is_vendor_property(&self, name: &str) -> bool {
        self.properties.contains(&name)
    }

    /// Prefixed spellings of `name`; empty for non-registry properties
    pub fn prefixed(&self, name: &str) -> Vec<String> {
        if !self.is_vendor_property(name) {
            return Vec::new();
        }
        let capitalized = capitalize(name);
        self.prefixes
            .iter()
            .map(|prefix| format!("{prefix}{capitalized}"))
            .collect()
    }

    /// Every property name a write of `name` touches, canonical first
    pub fn property_names(&self, name: &str) -> Vec<String> {
        let mut names = vec![name.to_string()];
        names.extend(self.prefixed(name));
        names
    }

    /// Event names subscribed for `event`: its aliases, or `event` itself
    pub fn event_names<'a>(&self, event: &'a str) -> Vec<&'a str> {
        self.events
            .iter()
            .find(|(canonical, _)| *canonical == event)
            .map(|(_, aliases)| aliases.to_vec())
            .unwrap_or_else(|| vec![event])
    }

    /// The `transition*` property an option key such as `duration` names
    pub fn transition_property(&self, option: &str) -> Option<String> {
        let name = format!("transition{}", capitalize(option));
        self.is_vendor_property(&name).then_some(name)
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_property_fans_out() {
        let names = DEFAULT_VENDOR_MAP.property_names("transform");
        assert_eq!(
            names,
            ["transform", "msTransform", "OTransform", "webkitTransform", "MozTransform"]
        );
    }

    #[test]
    fn test_plain_property_untouched() {
        assert_eq!(DEFAULT_VENDOR_MAP.property_names("color"), ["color"]);
        assert!(DEFAULT_VENDOR_MAP.prefixed("color").is_empty());
    }

    #[test]
    fn test_event_aliases() {
        let names = DEFAULT_VENDOR_MAP.event_names("transitionEnd");
        assert_eq!(names.len(), 5);
        assert!(names.contains(&"webkitTransitionEnd"));
        assert_eq!(DEFAULT_VENDOR_MAP.event_names("click"), ["click"]);
    }

    #[test]
    fn test_transition_option_keys() {
        assert_eq!(
            DEFAULT_VENDOR_MAP.transition_property("duration").as_deref(),
            Some("transitionDuration")
        );
        assert_eq!(
            DEFAULT_VENDOR_MAP.transition_property("timingFunction").as_deref(),
            Some("transitionTimingFunction")
        );
        assert_eq!(DEFAULT_VENDOR_MAP.transition_property("speed"), None);
    }
}
