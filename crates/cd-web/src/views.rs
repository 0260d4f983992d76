//! HTML views
//!
//! Templates live next to the crate as standalone `.html` files and are
//! compiled in with `include_str!`. Names ending in `.html` get minijinja's
//! HTML auto-escaping.

use axum::response::Html;
use minijinja::Environment;
use serde::Serialize;

use crate::error::Result;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("contacts.html", include_str!("../templates/contacts.html")),
    ("form_fields.html", include_str!("../templates/form_fields.html")),
    ("new.html", include_str!("../templates/new.html")),
    ("edit.html", include_str!("../templates/edit.html")),
    ("view.html", include_str!("../templates/view.html")),
    ("not_found.html", include_str!("../templates/not_found.html")),
];

/// Compiled template set
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    /// Compile every page template
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Render a named template with the given context
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<Html<String>> {
        let template = self.env.get_template(name)?;
        Ok(Html(template.render(ctx)?))
    }
}
