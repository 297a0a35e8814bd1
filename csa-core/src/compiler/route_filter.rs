//! Route-short-name filtering: a regex, optionally negated with a leading `!`.

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::Route;

pub struct RouteFilter {
    pattern: Regex,
    negate: bool,
}

impl RouteFilter {
    /// Parses `route_pattern`: a leading `!` negates the match; the literal
    /// `"!"` is rejected as [`Error::SillyPattern`].
    pub fn parse(route_pattern: &str) -> Result<Self> {
        if route_pattern == "!" {
            return Err(Error::SillyPattern);
        }
        let (negate, body) = match route_pattern.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, route_pattern),
        };
        let pattern = Regex::new(body)?;
        Ok(RouteFilter { pattern, negate })
    }

    pub fn matches(&self, route: &Route) -> bool {
        let hit = self.pattern.is_match(&route.route_short_name);
        hit != self.negate
    }
}
