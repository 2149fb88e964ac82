//! Display text of content-bearing objects.
//!
//! Microblog posts are displayed as they are. Long-form types are composed
//! from their title, summary, body and link with a template picked from
//! [`RENDERERS`].

use std::sync::LazyLock;

use minijinja::{AutoEscape, Environment};
use serde::Serialize;
use tracing::warn;

use super::model::ObjectType;

/// Template used for each long-form object type. Types without an entry are
/// displayed as their plain content.
static RENDERERS: [(ObjectType, &str); 3] = [
    (ObjectType::Article, "article"),
    (ObjectType::Page, "page"),
    (ObjectType::Event, "page"),
];

static TEMPLATES: [(&str, &str); 2] = [("article", ARTICLE_TEMPLATE), ("page", PAGE_TEMPLATE)];

const ARTICLE_TEMPLATE: &str = "{% if title %}<h2>{{ title }}</h2>\n\n{% endif %}\
{% if summary %}{{ summary }}\n\n{% endif %}\
{% if content %}{{ content }}\n\n{% endif %}\
{% if url %}<p><a href=\"{{ url }}\">{{ url }}</a></p>{% endif %}";

const PAGE_TEMPLATE: &str = "{% if title %}<h2>{{ title }}</h2>\n\n{% endif %}\
{% if content %}{{ content }}\n\n{% endif %}\
{% if url %}<p><a href=\"{{ url }}\">{{ url }}</a></p>{% endif %}";

static ENVIRONMENT: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    // Output is sanitized by the consumer.
    env.set_auto_escape_callback(|_| AutoEscape::None);
    for (name, source) in TEMPLATES {
        if let Err(err) = env.add_template(name, source) {
            warn!(target: "render", %err, template = name, "failed to compile template");
        }
    }
    env
});

/// Source fields of a rendered post.
#[derive(Debug, Default, Serialize)]
pub(crate) struct Sections<'a> {
    pub(crate) title: Option<&'a str>,
    pub(crate) summary: Option<&'a str>,
    pub(crate) content: Option<&'a str>,
    pub(crate) url: Option<&'a str>,
}

pub(crate) fn has_renderer(object_type: ObjectType) -> bool {
    template_name(object_type).is_some()
}

fn template_name(object_type: ObjectType) -> Option<&'static str> {
    RENDERERS
        .iter()
        .find(|(ty, _)| *ty == object_type)
        .map(|(_, name)| *name)
}

pub(crate) fn render(object_type: ObjectType, sections: &Sections<'_>) -> String {
    let plain = || sections.content.unwrap_or_default().to_string();
    let Some(name) = template_name(object_type) else {
        return plain();
    };
    let rendered = ENVIRONMENT
        .get_template(name)
        .and_then(|template| template.render(sections));
    match rendered {
        Ok(text) => text.trim_end().to_string(),
        Err(err) => {
            warn!(target: "render", %err, %object_type, "falling back to plain content");
            plain()
        }
    }
}
