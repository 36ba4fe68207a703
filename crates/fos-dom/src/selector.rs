//! CSS Selectors
//!
//! Parsing and matching for the selector subset `querySelectorAll` callers
//! use: type/universal/id/class/attribute selectors, structural
//! pseudo-classes, `:not()`, and all four combinators. Matching runs right to
//! left against the arena.

use crate::{DomTree, NodeId, SelectorError};

/// Selector specificity (ids, classes, types)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl std::ops::Add for Specificity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0, self.1 + rhs.1, self.2 + rhs.2)
    }
}

/// Comma-separated selector list
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList(Vec<Selector>);

/// One complex selector: compounds joined by combinators
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    /// Rightmost compound last; each combinator links to the compound before it
    compounds: Vec<Compound>,
    combinators: Vec<Combinator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
    /// `a + b`
    NextSibling,
    /// `a ~ b`
    SubsequentSibling,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Compound {
    parts: Vec<Component>,
}

#[derive(Debug, Clone, PartialEq)]
enum Component {
    Universal,
    Type(String),
    Id(String),
    Class(String),
    Attribute(AttributeSelector),
    PseudoClass(PseudoClass),
}

#[derive(Debug, Clone, PartialEq)]
struct AttributeSelector {
    name: String,
    matcher: Option<(AttributeMatcher, String)>,
    case_insensitive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttributeMatcher {
    /// `[attr=value]`
    Exact,
    /// `[attr~=value]`
    Includes,
    /// `[attr|=value]`
    DashMatch,
    /// `[attr^=value]`
    Prefix,
    /// `[attr$=value]`
    Suffix,
    /// `[attr*=value]`
    Substring,
}

#[derive(Debug, Clone, PartialEq)]
enum PseudoClass {
    Root,
    Empty,
    FirstChild,
    LastChild,
    OnlyChild,
    FirstOfType,
    LastOfType,
    OnlyOfType,
    NthChild(Nth),
    NthLastChild(Nth),
    NthOfType(Nth),
    NthLastOfType(Nth),
    Checked,
    Disabled,
    Enabled,
    Not(SelectorList),
}

/// An+B expression for :nth-* selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Nth {
    a: i32,
    b: i32,
}

impl Nth {
    fn parse(s: &str) -> Option<Self> {
        let s: String = s.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_lowercase();
        match s.as_str() {
            "odd" => return Some(Self { a: 2, b: 1 }),
            "even" => return Some(Self { a: 2, b: 0 }),
            _ => {}
        }
        if let Ok(b) = s.parse::<i32>() {
            return Some(Self { a: 0, b });
        }
        let n_pos = s.find('n')?;
        let a = match &s[..n_pos] {
            "" | "+" => 1,
            "-" => -1,
            other => other.parse().ok()?,
        };
        let rest = &s[n_pos + 1..];
        let b = if rest.is_empty() { 0 } else { rest.parse().ok()? };
        Some(Self { a, b })
    }

    /// Check if 1-based position `n` matches
    fn matches(self, n: i32) -> bool {
        if self.a == 0 {
            return n == self.b;
        }
        let diff = n - self.b;
        diff % self.a == 0 && diff / self.a >= 0
    }
}

impl SelectorList {
    /// Parse a selector list such as `#container article h3, p > span`
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut parser = Parser::new(input);
        let list = parser.parse_list()?;
        parser.skip_whitespace();
        match parser.peek() {
            None => Ok(list),
            Some(c) => Err(SelectorError::UnexpectedToken {
                offset: parser.pos,
                found: c,
            }),
        }
    }

    pub fn selectors(&self) -> &[Selector] {
        &self.0
    }

    /// True when any selector in the list matches `node`
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        self.0.iter().any(|s| s.matches(tree, node))
    }

    /// Highest specificity among selectors in the list that match `node`
    pub fn matching_specificity(&self, tree: &DomTree, node: NodeId) -> Option<Specificity> {
        self.0
            .iter()
            .filter(|s| s.matches(tree, node))
            .map(Selector::specificity)
            .max()
    }

    /// All matching elements below `root`, in document order
    pub fn query_all(&self, tree: &DomTree, root: NodeId) -> Vec<NodeId> {
        tree.descendants(root)
            .into_iter()
            .filter(|&n| tree.is_element(n) && self.matches(tree, n))
            .collect()
    }

    /// First matching element below `root`
    pub fn query_first(&self, tree: &DomTree, root: NodeId) -> Option<NodeId> {
        tree.descendants(root)
            .into_iter()
            .find(|&n| tree.is_element(n) && self.matches(tree, n))
    }

    fn max_specificity(&self) -> Specificity {
        self.0.iter().map(Selector::specificity).max().unwrap_or_default()
    }
}

impl Selector {
    pub fn specificity(&self) -> Specificity {
        self.compounds
            .iter()
            .flat_map(|c| c.parts.iter())
            .map(Component::specificity)
            .fold(Specificity::default(), |acc, s| acc + s)
    }

    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        self.matches_from(tree, node, self.compounds.len() - 1)
    }

    fn matches_from(&self, tree: &DomTree, node: NodeId, index: usize) -> bool {
        if !self.compounds[index].matches(tree, node) {
            return false;
        }
        if index == 0 {
            return true;
        }
        let next = index - 1;
        match self.combinators[next] {
            Combinator::Child => tree
                .parent(node)
                .is_some_and(|p| self.matches_from(tree, p, next)),
            Combinator::Descendant => tree
                .ancestors(node)
                .any(|a| self.matches_from(tree, a, next)),
            Combinator::NextSibling => {
                previous_element_sibling(tree, node).is_some_and(|s| self.matches_from(tree, s, next))
            }
            Combinator::SubsequentSibling => {
                let mut current = previous_element_sibling(tree, node);
                while let Some(sibling) = current {
                    if self.matches_from(tree, sibling, next) {
                        return true;
                    }
                    current = previous_element_sibling(tree, sibling);
                }
                false
            }
        }
    }
}

fn previous_element_sibling(tree: &DomTree, node: NodeId) -> Option<NodeId> {
    let mut current = tree.get(node)?.prev_sibling;
    while current.is_valid() {
        if tree.is_element(current) {
            return Some(current);
        }
        current = tree.get(current)?.prev_sibling;
    }
    None
}

impl Compound {
    fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        tree.is_element(node) && self.parts.iter().all(|p| p.matches(tree, node))
    }
}

impl Component {
    fn specificity(&self) -> Specificity {
        match self {
            Self::Universal => Specificity(0, 0, 0),
            Self::Type(_) => Specificity(0, 0, 1),
            Self::Id(_) => Specificity(1, 0, 0),
            Self::Class(_) | Self::Attribute(_) => Specificity(0, 1, 0),
            Self::PseudoClass(PseudoClass::Not(list)) => list.max_specificity(),
            Self::PseudoClass(_) => Specificity(0, 1, 0),
        }
    }

    fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        let Some(elem) = tree.element(node) else {
            return false;
        };
        match self {
            Self::Universal => true,
            Self::Type(tag) => elem.tag_name.eq_ignore_ascii_case(tag),
            Self::Id(id) => elem.id() == Some(id.as_str()),
            Self::Class(class) => elem.class_list().contains(class),
            Self::Attribute(attr) => attr.matches(elem.get_attribute(&attr.name)),
            Self::PseudoClass(pseudo) => pseudo.matches(tree, node),
        }
    }
}

impl AttributeSelector {
    fn matches(&self, value: Option<&str>) -> bool {
        let (Some((matcher, expected)), Some(value)) = (&self.matcher, value) else {
            return self.matcher.is_none() && value.is_some();
        };
        let (value, expected) = if self.case_insensitive {
            (value.to_lowercase(), expected.to_lowercase())
        } else {
            (value.to_string(), expected.clone())
        };
        match matcher {
            AttributeMatcher::Exact => value == expected,
            AttributeMatcher::Includes => value.split_ascii_whitespace().any(|w| w == expected),
            AttributeMatcher::DashMatch => {
                value == expected || value.starts_with(&format!("{expected}-"))
            }
            AttributeMatcher::Prefix => !expected.is_empty() && value.starts_with(&expected),
            AttributeMatcher::Suffix => !expected.is_empty() && value.ends_with(&expected),
            AttributeMatcher::Substring => !expected.is_empty() && value.contains(&expected),
        }
    }
}

impl PseudoClass {
    fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        let Some(elem) = tree.element(node) else {
            return false;
        };
        let siblings = || -> Vec<NodeId> {
            match tree.parent(node) {
                Some(parent) => tree.element_children(parent).collect(),
                None => vec![node],
            }
        };
        let same_type = || -> Vec<NodeId> {
            siblings()
                .into_iter()
                .filter(|&s| tree.element(s).is_some_and(|e| e.tag_name == elem.tag_name))
                .collect()
        };
        let position = |list: &[NodeId]| list.iter().position(|&s| s == node).map_or(0, |p| p as i32 + 1);
        let position_from_end = |list: &[NodeId]| {
            list.iter().rev().position(|&s| s == node).map_or(0, |p| p as i32 + 1)
        };

        match self {
            Self::Root => tree.parent(node) == Some(NodeId::ROOT),
            Self::Empty => tree
                .children(node)
                .all(|c| tree.get(c).is_some_and(|n| !n.is_element() && n.as_text().is_none_or(str::is_empty))),
            Self::FirstChild => position(&siblings()) == 1,
            Self::LastChild => position_from_end(&siblings()) == 1,
            Self::OnlyChild => siblings().len() == 1,
            Self::FirstOfType => position(&same_type()) == 1,
            Self::LastOfType => position_from_end(&same_type()) == 1,
            Self::OnlyOfType => same_type().len() == 1,
            Self::NthChild(nth) => nth.matches(position(&siblings())),
            Self::NthLastChild(nth) => nth.matches(position_from_end(&siblings())),
            Self::NthOfType(nth) => nth.matches(position(&same_type())),
            Self::NthLastOfType(nth) => nth.matches(position_from_end(&same_type())),
            Self::Checked => elem.get_attribute("checked").is_some() || elem.get_attribute("selected").is_some(),
            Self::Disabled => elem.get_attribute("disabled").is_some(),
            Self::Enabled => is_form_control(&elem.tag_name) && elem.get_attribute("disabled").is_none(),
            Self::Not(list) => !list.matches(tree, node),
        }
    }
}

fn is_form_control(tag: &str) -> bool {
    matches!(tag, "input" | "button" | "select" | "textarea" | "option" | "fieldset")
}

/// Character cursor over selector text
struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
        self.pos != start
    }

    fn unexpected(&self) -> SelectorError {
        match self.peek() {
            Some(found) => SelectorError::UnexpectedToken {
                offset: self.pos,
                found,
            },
            None => SelectorError::UnexpectedEnd,
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), SelectorError> {
        if self.peek() == Some(expected) {
            self.bump();
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn parse_list(&mut self) -> Result<SelectorList, SelectorError> {
        let mut selectors = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek().is_none() && selectors.is_empty() {
                return Err(SelectorError::Empty);
            }
            selectors.push(self.parse_selector()?);
            self.skip_whitespace();
            if self.peek() == Some(',') {
                self.bump();
            } else {
                return Ok(SelectorList(selectors));
            }
        }
    }

    fn parse_selector(&mut self) -> Result<Selector, SelectorError> {
        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();
        loop {
            let had_space = self.skip_whitespace();
            let combinator = match self.peek() {
                Some('>') => Combinator::Child,
                Some('+') => Combinator::NextSibling,
                Some('~') => Combinator::SubsequentSibling,
                Some(',') | Some(')') | None => break,
                Some(_) if had_space => Combinator::Descendant,
                Some(_) => return Err(self.unexpected()),
            };
            if combinator != Combinator::Descendant {
                self.bump();
                self.skip_whitespace();
            }
            combinators.push(combinator);
            compounds.push(self.parse_compound()?);
        }
        Ok(Selector {
            compounds,
            combinators,
        })
    }

    fn parse_compound(&mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();
        match self.peek() {
            Some('*') => {
                self.bump();
                compound.parts.push(Component::Universal);
            }
            Some(c) if is_ident_start(c) => {
                compound.parts.push(Component::Type(self.parse_ident()?.to_ascii_lowercase()));
            }
            _ => {}
        }
        loop {
            match self.peek() {
                Some('#') => {
                    self.bump();
                    compound.parts.push(Component::Id(self.parse_ident()?));
                }
                Some('.') => {
                    self.bump();
                    compound.parts.push(Component::Class(self.parse_ident()?));
                }
                Some('[') => compound.parts.push(Component::Attribute(self.parse_attribute()?)),
                Some(':') => compound.parts.push(Component::PseudoClass(self.parse_pseudo()?)),
                _ => break,
            }
        }
        if compound.parts.is_empty() {
            return Err(self.unexpected());
        }
        Ok(compound)
    }

    fn parse_ident(&mut self) -> Result<String, SelectorError> {
        let mut ident = String::new();
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.bump();
                match self.bump() {
                    Some(escaped) => ident.push(escaped),
                    None => return Err(SelectorError::UnexpectedEnd),
                }
            } else if is_ident_char(c) {
                ident.push(c);
                self.bump();
            } else {
                break;
            }
        }
        if ident.is_empty() {
            return Err(self.unexpected());
        }
        Ok(ident)
    }

    fn parse_attribute(&mut self) -> Result<AttributeSelector, SelectorError> {
        self.expect('[')?;
        self.skip_whitespace();
        let name = self.parse_ident()?.to_ascii_lowercase();
        self.skip_whitespace();

        let matcher = match self.peek() {
            Some(']') => None,
            Some('=') => Some(AttributeMatcher::Exact),
            Some('~') => Some(AttributeMatcher::Includes),
            Some('|') => Some(AttributeMatcher::DashMatch),
            Some('^') => Some(AttributeMatcher::Prefix),
            Some('$') => Some(AttributeMatcher::Suffix),
            Some('*') => Some(AttributeMatcher::Substring),
            _ => return Err(self.unexpected()),
        };

        let mut selector = AttributeSelector {
            name,
            matcher: None,
            case_insensitive: false,
        };
        if let Some(matcher) = matcher {
            if matcher != AttributeMatcher::Exact {
                self.bump();
            }
            self.expect('=')?;
            self.skip_whitespace();
            let value = self.parse_attribute_value()?;
            self.skip_whitespace();
            if let Some(flag @ ('i' | 'I' | 's' | 'S')) = self.peek() {
                self.bump();
                selector.case_insensitive = flag.eq_ignore_ascii_case(&'i');
                self.skip_whitespace();
            }
            selector.matcher = Some((matcher, value));
        }
        self.expect(']')?;
        Ok(selector)
    }

    fn parse_attribute_value(&mut self) -> Result<String, SelectorError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                let mut value = String::new();
                loop {
                    match self.bump() {
                        Some(c) if c == quote => return Ok(value),
                        Some('\\') => match self.bump() {
                            Some(c) => value.push(c),
                            None => return Err(SelectorError::UnexpectedEnd),
                        },
                        Some(c) => value.push(c),
                        None => return Err(SelectorError::UnexpectedEnd),
                    }
                }
            }
            _ => self.parse_ident(),
        }
    }

    fn parse_pseudo(&mut self) -> Result<PseudoClass, SelectorError> {
        self.expect(':')?;
        let name = self.parse_ident()?.to_ascii_lowercase();
        let argument = if self.peek() == Some('(') {
            self.bump();
            Some(self.take_until_close_paren()?)
        } else {
            None
        };

        let nth = |arg: Option<&str>| -> Result<Nth, SelectorError> {
            let arg = arg.unwrap_or_default();
            Nth::parse(arg).ok_or_else(|| SelectorError::InvalidNth(arg.to_string()))
        };

        let pseudo = match (name.as_str(), argument.as_deref()) {
            ("root", None) => PseudoClass::Root,
            ("empty", None) => PseudoClass::Empty,
            ("first-child", None) => PseudoClass::FirstChild,
            ("last-child", None) => PseudoClass::LastChild,
            ("only-child", None) => PseudoClass::OnlyChild,
            ("first-of-type", None) => PseudoClass::FirstOfType,
            ("last-of-type", None) => PseudoClass::LastOfType,
            ("only-of-type", None) => PseudoClass::OnlyOfType,
            ("checked", None) => PseudoClass::Checked,
            ("disabled", None) => PseudoClass::Disabled,
            ("enabled", None) => PseudoClass::Enabled,
            ("nth-child", arg @ Some(_)) => PseudoClass::NthChild(nth(arg)?),
            ("nth-last-child", arg @ Some(_)) => PseudoClass::NthLastChild(nth(arg)?),
            ("nth-of-type", arg @ Some(_)) => PseudoClass::NthOfType(nth(arg)?),
            ("nth-last-of-type", arg @ Some(_)) => PseudoClass::NthLastOfType(nth(arg)?),
            ("not", Some(arg)) => PseudoClass::Not(SelectorList::parse(arg)?),
            _ => return Err(SelectorError::UnsupportedPseudoClass(name)),
        };
        Ok(pseudo)
    }

    /// Consume up to the matching `)`, returning the text in between
    fn take_until_close_paren(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        let mut depth = 1;
        while let Some(c) = self.bump() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(self.input[start..self.pos - 1].to_string());
                    }
                }
                _ => {}
            }
        }
        Err(SelectorError::UnexpectedEnd)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '-' || !c.is_ascii()
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || !c.is_ascii()
}
