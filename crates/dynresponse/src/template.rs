// File: src/template.rs
// Purpose: Named templates rendered against a merged context

use crate::context::Context;
use anyhow::{anyhow, Context as _, Result};
use maud::Markup;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Renders a named template to an HTML string.
pub trait TemplateEngine: Send + Sync {
    fn render(&self, name: &str, context: &Context) -> Result<String>;
}

impl<F> TemplateEngine for F
where
    F: Fn(&str, &Context) -> Result<String> + Send + Sync,
{
    fn render(&self, name: &str, context: &Context) -> Result<String> {
        self(name, context)
    }
}

type MarkupFn = Arc<dyn Fn(&Context) -> Markup + Send + Sync>;

#[derive(Clone)]
enum Template {
    /// HTML source with `{var}` / `{a.b}` placeholders
    Source(String),
    /// Compiled maud template
    Markup(MarkupFn),
}

/// Template registry keyed by name (e.g. `"contact/form.html"`).
#[derive(Clone, Default)]
pub struct Templates {
    templates: HashMap<String, Template>,
}

impl Templates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_source(&mut self, name: impl Into<String>, source: impl Into<String>) -> &mut Self {
        self.templates
            .insert(name.into(), Template::Source(source.into()));
        self
    }

    pub fn add_markup<F>(&mut self, name: impl Into<String>, template: F) -> &mut Self
    where
        F: Fn(&Context) -> Markup + Send + Sync + 'static,
    {
        self.templates
            .insert(name.into(), Template::Markup(Arc::new(template)));
        self
    }

    /// Load every `*.html` file under `dir`, named by its path relative to `dir`.
    /// Returns the number of templates loaded.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize> {
        let dir = dir.as_ref();
        let mut loaded = 0;
        self.load_directory(dir, dir, &mut loaded)?;
        tracing::debug!(dir = %dir.display(), loaded, "Loaded templates");
        Ok(loaded)
    }

    fn load_directory(&mut self, root: &Path, dir: &Path, loaded: &mut usize) -> Result<()> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read template directory: {:?}", dir))?;

        for entry in entries {
            let path = entry?.path();

            if path.is_dir() {
                self.load_directory(root, &path, loaded)?;
                continue;
            }

            if path.extension().and_then(|s| s.to_str()) != Some("html") {
                continue;
            }

            let source = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read template: {:?}", path))?;
            let name = template_name(root, &path)?;
            self.add_source(name, source);
            *loaded += 1;
        }

        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateEngine for Templates {
    fn render(&self, name: &str, context: &Context) -> Result<String> {
        match self.templates.get(name) {
            Some(Template::Source(source)) => Ok(interpolate(source, context)),
            Some(Template::Markup(template)) => Ok(template(context).into_string()),
            None => Err(anyhow!("template not found: {}", name)),
        }
    }
}

fn template_name(root: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .with_context(|| format!("Template outside of {:?}: {:?}", root, path))?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

fn interpolate(source: &str, context: &Context) -> String {
    static VAR_REGEX: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"\{([a-zA-Z_][a-zA-Z0-9_\.]*)\}").unwrap()
    });

    VAR_REGEX
        .replace_all(source, |caps: &regex::Captures| {
            let name = &caps[1];
            lookup(context, name)
                .map(display_escaped)
                .unwrap_or_else(|| format!("{{{}}}", name))
        })
        .into_owned()
}

fn lookup<'a>(context: &'a Context, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let mut current = context.get(parts.next()?)?;
    for part in parts {
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

fn display_escaped(value: &Value) -> String {
    let text = match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    maud::html! { (text) }.into_string()
}
