// ABOUTME: Case-insensitive token rules matched against an element's id, class and name values.
// ABOUTME: Holds the boilerplate blacklist and the special-purpose removal filters.

use scraper::node::Element;

/// Attributes every rule is checked against.
pub const MATCHED_ATTRS: [&str; 3] = ["id", "class", "name"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    StartsWith,
    Contains,
    EndsWith,
    Equals,
}

/// Carve-outs that turn an otherwise matching value back into a miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Except {
    /// The whole value starts with this prefix.
    Prefix(&'static str),
    /// The token occurrence is immediately preceded by this character.
    PrecededBy(char),
}

/// One lowercase token plus how it must appear in an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrRule {
    mode: MatchMode,
    token: &'static str,
    except: Option<Except>,
}

impl AttrRule {
    pub const fn new(mode: MatchMode, token: &'static str) -> Self {
        Self {
            mode,
            token,
            except: None,
        }
    }

    pub const fn equals(token: &'static str) -> Self {
        Self::new(MatchMode::Equals, token)
    }

    pub const fn contains(token: &'static str) -> Self {
        Self::new(MatchMode::Contains, token)
    }

    pub const fn starts_with(token: &'static str) -> Self {
        Self::new(MatchMode::StartsWith, token)
    }

    pub const fn ends_with(token: &'static str) -> Self {
        Self::new(MatchMode::EndsWith, token)
    }

    pub const fn except(self, except: Except) -> Self {
        Self {
            mode: self.mode,
            token: self.token,
            except: Some(except),
        }
    }

    /// Tests an already-lowercased attribute value.
    pub fn matches_value(&self, value: &str) -> bool {
        if let Some(Except::Prefix(prefix)) = self.except {
            if value.starts_with(prefix) {
                return false;
            }
        }

        match self.mode {
            MatchMode::Equals => value == self.token,
            MatchMode::StartsWith => value.starts_with(self.token),
            MatchMode::EndsWith => value.ends_with(self.token),
            MatchMode::Contains => match self.except {
                Some(Except::PrecededBy(c)) => value
                    .match_indices(self.token)
                    .any(|(at, _)| !value[..at].ends_with(c)),
                _ => value.contains(self.token),
            },
        }
    }
}

/// True if any of the element's id, class or name values satisfies any rule.
pub fn matches_any(element: &Element, rules: &[AttrRule]) -> bool {
    MATCHED_ATTRS
        .iter()
        .filter_map(|attr| element.attr(attr))
        .map(str::to_lowercase)
        .any(|value| rules.iter().any(|rule| rule.matches_value(&value)))
}

/// Common boilerplate: navigation, sharing, comments, bylines, footers and ads.
pub const BOILERPLATE: &[AttrRule] = &[
    AttrRule::equals("side"),
    AttrRule::equals("inset"),
    AttrRule::equals("subscribe"),
    AttrRule::equals("date"),
    AttrRule::equals("print"),
    AttrRule::equals("fn"),
    AttrRule::ends_with("meta"),
    AttrRule::starts_with("ad-"),
    AttrRule::starts_with("ads-"),
    AttrRule::starts_with("share"),
    AttrRule::starts_with("social-"),
    AttrRule::contains("combx"),
    AttrRule::contains("retweet"),
    AttrRule::contains("mediaarticlerelated"),
    AttrRule::contains("menucontainer"),
    AttrRule::contains("navbar"),
    AttrRule::contains("storytopbar-bucket"),
    AttrRule::contains("utility-bar"),
    AttrRule::contains("inline-share-tools"),
    AttrRule::contains("comment"),
    AttrRule::contains("popularquestions"),
    AttrRule::contains("contact"),
    AttrRule::contains("foot"),
    AttrRule::contains("links"),
    AttrRule::contains("shoutbox"),
    AttrRule::contains("sponsor"),
    AttrRule::contains("tags"),
    AttrRule::contains("socialnetworking"),
    AttrRule::contains("socialtools"),
    AttrRule::contains("pagetools"),
    AttrRule::contains("post-attributes"),
    AttrRule::contains("welcome_form"),
    AttrRule::contains("contenttools2"),
    AttrRule::contains("the_answers"),
    AttrRule::contains("communitypromo"),
    AttrRule::contains("runaroundleft"),
    AttrRule::contains("vcard"),
    AttrRule::contains("articleheadings"),
    AttrRule::contains("popup"),
    AttrRule::contains("author-dropdown"),
    AttrRule::contains("tools"),
    AttrRule::contains("byline"),
    AttrRule::contains("konafilter"),
    AttrRule::contains("breadcrumbs"),
    AttrRule::contains("wp-caption-text"),
    AttrRule::contains("legende"),
    AttrRule::contains("ajoutvideo"),
    AttrRule::contains("timestamp"),
    AttrRule::contains("js_replies"),
    AttrRule::contains("disclaim"),
];

/// Captions, Google widgets, "more" teasers and social embeds.
pub const SPECIAL: &[AttrRule] = &[
    AttrRule::equals("caption"),
    AttrRule::contains(" google "),
    AttrRule::contains("more").except(Except::Prefix("entry-")),
    AttrRule::contains("facebook").except(Except::PrecededBy('-')),
    AttrRule::contains("twitter").except(Except::PrecededBy('-')),
];
