//! Page head script registry
//!
//! A minimal head manager for server-rendered pages: scripts are kept in
//! registration order, de-duplicated by id, and rendered as `<script>` tags.
//! Inline bodies are emitted as-is; no sanitizer runs over them.

use crate::script::ScriptDescriptor;

/// Ordered set of head scripts for one rendered page.
#[derive(Debug, Clone, Default)]
pub struct PageHead {
    scripts: Vec<ScriptDescriptor>,
}

impl PageHead {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add scripts in order. A script whose id is already registered
    /// replaces the earlier entry in place; scripts without an id are
    /// always appended.
    pub fn add_scripts<I>(&mut self, scripts: I)
    where
        I: IntoIterator<Item = ScriptDescriptor>,
    {
        for script in scripts {
            if script.id.is_empty() {
                self.scripts.push(script);
                continue;
            }
            match self.scripts.iter_mut().find(|s| s.id == script.id) {
                Some(existing) => *existing = script,
                None => self.scripts.push(script),
            }
        }
    }

    pub fn scripts(&self) -> &[ScriptDescriptor] {
        &self.scripts
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Render all scripts, one tag per line.
    pub fn render(&self) -> String {
        self.scripts
            .iter()
            .map(render_script)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn render_script(script: &ScriptDescriptor) -> String {
    let mut tag = String::from("<script");
    if !script.id.is_empty() {
        tag.push_str(&format!(" data-hid=\"{}\"", script.id));
    }
    if let Some(src) = &script.src {
        tag.push_str(&format!(" src=\"{}\"", src));
    }
    if script.async_load {
        tag.push_str(" async");
    }
    tag.push('>');
    if let Some(body) = &script.inline_body {
        tag.push_str(body);
    }
    tag.push_str("</script>");
    tag
}
