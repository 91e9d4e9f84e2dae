//! Template rendering with field substitution

use std::collections::HashMap;

use crate::error::{OutreachError, Result};

/// A parsed piece of template text
#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    /// A single brace produced by `{{` or `}}`
    Brace(char),
    Placeholder(&'a str),
}

/// Renders outreach templates by substituting fields
pub struct TemplateRenderer;

impl TemplateRenderer {
    /// Render a template against a field map
    ///
    /// Every `{name}` must have a matching key in `fields`, otherwise the
    /// first unresolved name is returned as `MissingField`. Extra fields are
    /// ignored.
    pub fn render(template: &str, fields: &HashMap<String, String>) -> Result<String> {
        let segments = Self::parse(template)?;
        let mut rendered = String::with_capacity(template.len());

        for segment in segments {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::Brace(brace) => rendered.push(brace),
                Segment::Placeholder(name) => {
                    let value = fields
                        .get(name)
                        .ok_or_else(|| OutreachError::MissingField(name.to_string()))?;
                    rendered.push_str(value);
                }
            }
        }

        Ok(rendered)
    }

    /// Distinct placeholder names in order of first appearance
    pub fn placeholders(template: &str) -> Result<Vec<String>> {
        let mut names: Vec<String> = Vec::new();

        for segment in Self::parse(template)? {
            if let Segment::Placeholder(name) = segment {
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
        }

        Ok(names)
    }

    /// Check that the template parses and that `available` covers every placeholder
    pub fn check(template: &str, available: &[&str]) -> Result<()> {
        match Self::placeholders(template)?
            .into_iter()
            .find(|name| !available.contains(&name.as_str()))
        {
            Some(name) => Err(OutreachError::MissingField(name)),
            None => Ok(()),
        }
    }

    fn parse(template: &str) -> Result<Vec<Segment<'_>>> {
        let mut segments = Vec::new();
        let mut literal_start = 0;
        let mut chars = template.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' | '}' if chars.peek().map(|&(_, next)| next) == Some(c) => {
                    chars.next();
                    if literal_start < pos {
                        segments.push(Segment::Literal(&template[literal_start..pos]));
                    }
                    segments.push(Segment::Brace(c));
                    literal_start = pos + 2;
                }
                '{' => {
                    let name_start = pos + 1;
                    let close = template[name_start..].find(['{', '}']).map(|offset| name_start + offset);

                    let name_end = match close {
                        Some(end) if template.as_bytes()[end] == b'}' => end,
                        _ => {
                            return Err(OutreachError::InvalidTemplate(format!(
                                "unclosed '{{' at position {}",
                                pos
                            )))
                        }
                    };

                    if name_end == name_start {
                        return Err(OutreachError::InvalidTemplate(format!(
                            "empty placeholder at position {}",
                            pos
                        )));
                    }

                    if literal_start < pos {
                        segments.push(Segment::Literal(&template[literal_start..pos]));
                    }
                    segments.push(Segment::Placeholder(&template[name_start..name_end]));

                    // Skip the name and the closing brace
                    while let Some(&(next_pos, _)) = chars.peek() {
                        if next_pos > name_end {
                            break;
                        }
                        chars.next();
                    }
                    literal_start = name_end + 1;
                }
                '}' => {
                    return Err(OutreachError::InvalidTemplate(format!(
                        "single '}}' at position {}",
                        pos
                    )))
                }
                _ => {}
            }
        }

        if literal_start < template.len() {
            segments.push(Segment::Literal(&template[literal_start..]));
        }

        Ok(segments)
    }
}
