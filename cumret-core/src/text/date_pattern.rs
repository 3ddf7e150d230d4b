use std::fmt;

use time::Date;
use time::format_description::OwnedFormatItem;
use time::macros::format_description;

use crate::error::{CumretError, Result};

pub const DEFAULT_DATE_FORMAT: &str = "dd.MM.yyyy";
pub const INVARIANT_SHORT_DATE: &str = "MM/dd/yyyy";

/// A compiled custom date pattern (`dd.MM.yyyy` style).
///
/// Supported specifiers: `d`, `dd`, `ddd`, `dddd`, `M`, `MM`, `MMM`, `MMMM`
/// and `yyyy`. Quoted runs (`'...'` or `"..."`) and `\x` escapes are
/// literals, as is any other non-specifier character. Matching is exact:
/// the whole input has to be consumed, no whitespace is skipped and the
/// year carries no sign. Month and weekday names match in any case.
#[derive(Clone)]
pub struct DatePattern {
    source: String,
    items: OwnedFormatItem,
    /// `+`/`-` characters the pattern itself requires as literals.
    sign_literals: usize,
}

impl DatePattern {
    pub fn compile(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Err(CumretError::Pattern("empty date pattern".into()));
        }
        let (description, sign_literals) = translate(pattern)?;
        let items = time::format_description::parse_owned::<1>(&description)
            .map_err(|e| CumretError::Pattern(format!("{pattern}: {e}")))?;
        Ok(Self {
            source: pattern.to_string(),
            items,
            sign_literals,
        })
    }

    /// `dd.MM.yyyy`
    pub fn default_date() -> Self {
        Self {
            source: DEFAULT_DATE_FORMAT.to_string(),
            items: OwnedFormatItem::from(format_description!("[day].[month].[year]")),
            sign_literals: 0,
        }
    }

    /// `MM/dd/yyyy`
    pub fn invariant_short_date() -> Self {
        Self {
            source: INVARIANT_SHORT_DATE.to_string(),
            items: OwnedFormatItem::from(format_description!("[month]/[day]/[year]")),
            sign_literals: 0,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Exact parse; `None` when the text does not match the pattern or names
    /// an impossible date.
    pub fn parse(&self, text: &str) -> Option<Date> {
        // numeric components never take a sign, except the year, which must not
        let signs = text.chars().filter(|c| matches!(c, '+' | '-')).count();
        if signs != self.sign_literals {
            return None;
        }
        Date::parse(text, &self.items).ok()
    }

    pub fn format(&self, date: Date) -> Result<String> {
        date.format(&self.items)
            .map_err(|e| CumretError::Pattern(format!("{}: {e}", self.source)))
    }
}

impl fmt::Debug for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DatePattern").field(&self.source).finish()
    }
}

impl PartialEq for DatePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// Rewrites a custom date pattern into a `time` v1 format description and
/// counts the sign characters among its literals.
fn translate(pattern: &str) -> Result<(String, usize)> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 4);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            'd' | 'M' | 'y' => {
                let run = chars[i..].iter().take_while(|&&x| x == c).count();
                out.push_str(component(c, run, pattern)?);
                i += run;
            }
            '\'' | '"' => {
                let close = chars[i + 1..]
                    .iter()
                    .position(|&x| x == c)
                    .ok_or_else(|| {
                        CumretError::Pattern(format!("{pattern}: unterminated quoted literal"))
                    })?;
                for &lit in &chars[i + 1..i + 1 + close] {
                    push_literal(&mut out, lit);
                }
                i += close + 2;
            }
            '\\' => {
                let lit = chars.get(i + 1).ok_or_else(|| {
                    CumretError::Pattern(format!("{pattern}: dangling escape"))
                })?;
                push_literal(&mut out, *lit);
                i += 2;
            }
            'h' | 'H' | 'm' | 's' | 'f' | 'F' | 't' | 'z' | 'g' | 'K' => {
                return Err(CumretError::Pattern(format!(
                    "{pattern}: time specifier '{c}' is not supported for dates"
                )));
            }
            _ => {
                push_literal(&mut out, c);
                i += 1;
            }
        }
    }
    // component descriptions contain no signs, so every one left is a literal
    let sign_literals = out.chars().filter(|c| matches!(c, '+' | '-')).count();
    Ok((out, sign_literals))
}

fn component(c: char, run: usize, pattern: &str) -> Result<&'static str> {
    let item = match (c, run) {
        ('d', 1) => "[day padding:none]",
        ('d', 2) => "[day]",
        ('d', 3) => "[weekday repr:short case_sensitive:false]",
        ('d', _) => "[weekday repr:long case_sensitive:false]",
        ('M', 1) => "[month padding:none]",
        ('M', 2) => "[month]",
        ('M', 3) => "[month repr:short case_sensitive:false]",
        ('M', _) => "[month repr:long case_sensitive:false]",
        ('y', 4) => "[year]",
        ('y', n) => {
            return Err(CumretError::Pattern(format!(
                "{pattern}: year specifier of width {n} is not supported, use yyyy"
            )));
        }
        _ => {
            return Err(CumretError::Pattern(format!(
                "{pattern}: '{c}' is not a date specifier"
            )));
        }
    };
    Ok(item)
}

fn push_literal(out: &mut String, c: char) {
    if c == '[' {
        out.push_str("[[");
    } else {
        out.push(c);
    }
}
