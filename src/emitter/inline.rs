use super::Emitter;
use crate::error::Result;
use crate::logging::logger::DebugLogsCategories;
use crate::tree::{DocNode, NodeId, NodeKind};
use crate::utils::{file_name_of, is_data_uri, NAMED_REFERENCE, SUBSTITUTION_REFERENCE};

/// Inline emphasis styles and their reST markers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Typeface {
    Bold,
    Italic,
    Teletype,
}

impl Typeface {
    pub fn marker(self) -> &'static str {
        match self {
            Typeface::Bold => "**",
            Typeface::Italic => "*",
            Typeface::Teletype => "``",
        }
    }
}

/// Wrap already rendered `text` in `typeface` markup when reST can express
/// it, otherwise hand `text` back untouched.
///
/// No markup is applied when the stripped text is longer than `max_len`
/// characters, is already a substitution / named reference / emphasis
/// span, or contains a newline, a tab or an asterisk.  Wrapped text is
/// stripped and followed by one space so the closing marker is recognised.
///
/// # Examples
///
/// ```rust
/// use html2rest::{apply_typeface, Typeface};
///
/// assert_eq!(apply_typeface(" bold ", Typeface::Bold, 50), "**bold** ");
/// assert_eq!(apply_typeface("a*b", Typeface::Italic, 50), "a*b");
/// ```
pub fn apply_typeface(text: &str, typeface: Typeface, max_len: usize) -> String {
    let stripped = text.trim();
    if stripped.chars().count() > max_len {
        return text.to_string();
    }
    if is_marked_up(stripped) {
        return text.to_string();
    }
    if !stripped.is_empty() && !stripped.contains(['\n', '\t', '*']) {
        let marker = typeface.marker();
        return format!("{}{}{} ", marker, stripped, marker);
    }
    text.to_string()
}

fn is_marked_up(stripped: &str) -> bool {
    SUBSTITUTION_REFERENCE.is_match(stripped)
        || NAMED_REFERENCE.is_match(stripped)
        || (stripped.len() > 2 && stripped.starts_with('*') && stripped.ends_with('*'))
}

/// Remove one layer of `**` around a link text that the bold renderer
/// already wrapped.
fn strip_bold_layer(text: &str) -> &str {
    if text.len() >= 4 && text.starts_with("**") && text.ends_with("**") {
        &text[2..text.len() - 2]
    } else {
        text
    }
}

impl<'a> Emitter<'a> {
    pub(super) fn typeface(&mut self, id: NodeId, typeface: Typeface) -> Result<String> {
        let text = self.emit_children(id)?;
        let result = apply_typeface(&text, typeface, self.options.typeface_max_len);
        d!({
            if result == text
                && self.options.debug_categories.contains(DebugLogsCategories::INLINE_MARKUP)
            {
                eprintln!("inline: {:?} left unwrapped at {}: {:?}", typeface, id, text);
            }
        });
        Ok(result)
    }

    pub(super) fn code(&mut self, id: NodeId) -> Result<String> {
        Ok(format!("``{}``", self.emit_children(id)?))
    }

    /// Whether a link below `id` must use a separate target definition.
    fn prefers_substitution(&self, id: NodeId) -> bool {
        self.tree
            .ancestors(id)
            .any(|(_, node)| self.options.substitution_kinds.contains(&node.kind))
    }

    fn redirects_to_image(&self, url: &str) -> bool {
        self.options
            .image_link_prefixes
            .iter()
            .any(|prefix| url.starts_with(prefix.as_str()))
    }

    pub(super) fn link(&mut self, id: NodeId, node: &'a DocNode) -> Result<String> {
        let rendered = self.emit_children(id)?;
        let link_text = rendered.trim();
        if link_text.is_empty() {
            return Ok(String::new());
        }
        let url = match node.attr("href") {
            Some(url) => url,
            None => return Ok(String::new()),
        };
        let link_text = strip_bold_layer(link_text);

        if self.redirects_to_image(url) {
            for child in &node.children {
                let child = self.node(*child)?;
                if child.kind == NodeKind::Image {
                    return Ok(self.image(child));
                }
            }
            return Ok(String::new());
        }

        let resolution = self.links.resolve(link_text, url);
        let key = resolution.key().to_string();
        d!({
            if self.options.debug_categories.contains(DebugLogsCategories::SUBSTITUTIONS) {
                eprintln!("link: {:?} -> {} resolved as {:?}", link_text, url, resolution);
            }
        });

        if self.prefers_substitution(id) {
            if resolution.is_new() {
                let definition = self.links.definition(&key, url);
                self.pending.push(definition);
            }
            return Ok(format!("`{}`_ ", key));
        }
        if resolution.is_new() {
            Ok(format!("`{} <{}>`_ ", key, url))
        } else {
            Ok(format!("`{}`_ ", key))
        }
    }

    /// Render an `img` as a substitution reference, queueing its definition
    /// on first use.  Images without `src`, or with a `data:` source, vanish.
    pub(super) fn image(&mut self, node: &DocNode) -> String {
        let src = match node.attr("src") {
            Some(src) if !is_data_uri(src) => src,
            _ => return String::new(),
        };

        let alt = node.attr("alt").unwrap_or_default();
        let title = node.attr("title").unwrap_or_default();
        let caption = if alt.chars().count() > title.chars().count() { alt } else { title };
        let caption = if caption.is_empty() {
            file_name_of(src)
        } else {
            caption.to_string()
        };

        let resolution = self.images.resolve(&caption, src);
        if resolution.is_new() {
            let definition = self.images.definition(resolution.key(), src);
            self.pending.push(definition);
        }
        format!(" |{}| ", resolution.key())
    }
}
