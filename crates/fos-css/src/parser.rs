//! CSS Parser using lightningcss
//!
//! Parses stylesheets and lowers style rules into `fos_dom::StyleRule`s.
//! Only top-level style rules are kept; at-rules are skipped.

use fos_dom::{SelectorList, StyleRule};
use lightningcss::declaration::DeclarationBlock;
use lightningcss::rules::CssRule;
use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::traits::ToCss;

use crate::CssError;

/// CSS Parser
#[derive(Debug, Clone, Copy, Default)]
pub struct CssParser;

impl CssParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a CSS stylesheet
    pub fn parse(&self, css: &str) -> Result<Vec<StyleRule>, CssError> {
        let stylesheet = StyleSheet::parse(css, ParserOptions::default()).map_err(|e| {
            CssError::Parse {
                line: e.loc.as_ref().map(|loc| loc.line + 1),
                message: e.kind.to_string(),
            }
        })?;

        let mut rules = Vec::new();
        for rule in &stylesheet.rules.0 {
            match rule {
                CssRule::Style(style_rule) => {
                    let selector_text = style_rule
                        .selectors
                        .to_css_string(PrinterOptions::default())
                        .map_err(|e| CssError::Print(e.to_string()))?;
                    let selectors = match SelectorList::parse(&selector_text) {
                        Ok(selectors) => selectors,
                        Err(error) => {
                            tracing::trace!(selector = %selector_text, %error, "skipping rule with unsupported selector");
                            continue;
                        }
                    };
                    let mut converted = StyleRule::new(selectors, Vec::new());
                    self.convert_declarations(&style_rule.declarations, &mut converted)?;
                    rules.push(converted);
                }
                _ => tracing::trace!("skipping non-style rule"),
            }
        }

        tracing::debug!(rules = rules.len(), "parsed stylesheet");
        Ok(rules)
    }

    fn convert_declarations(
        &self,
        block: &DeclarationBlock,
        rule: &mut StyleRule,
    ) -> Result<(), CssError> {
        let normal = block.declarations.iter().map(|p| (p, false));
        let important = block.important_declarations.iter().map(|p| (p, true));
        for (property, is_important) in normal.chain(important) {
            // Printing the whole declaration keeps vendor prefixes on the name
            let text = property
                .to_css_string(false, PrinterOptions::default())
                .map_err(|e| CssError::Print(e.to_string()))?;
            for item in text.split(';') {
                if let Some((name, value)) = item.split_once(':') {
                    rule.push(name.trim(), value.trim(), is_important);
                }
            }
        }
        Ok(())
    }
}
