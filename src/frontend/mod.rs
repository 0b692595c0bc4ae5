//! Frontend target: Next.js pages per entity (collection with create form, detail) plus an index page.
//! Per-property rendering decisions are made once in `EntityPage` and shared by every page.

mod pages;

pub use pages::{CollectionPage, DetailPage, IndexPage};

use crate::artifact::Artifact;
use crate::config::{ResolvedEntity, ResolvedModel, ResolvedProperty};
use crate::settings::GeneratorSettings;
use crate::typemap::UiType;

pub const APP_DIR: &str = "frontend/src/app";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Text,
    /// Numbers and references; references are typed in as raw ids.
    Number,
}

/// Create-form input; one per persisted property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub input: InputKind,
}

/// How one persisted property is shown on item and detail views.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayField {
    Text {
        name: String,
        label: String,
    },
    /// Foreign key rendered as a link to `/{target_plural}/{value}`.
    Link {
        name: String,
        label: String,
        target_plural: String,
    },
}

impl DisplayField {
    pub fn for_property(p: &ResolvedProperty) -> Self {
        match p.reference() {
            Some(target) => DisplayField::Link {
                name: p.name.clone(),
                label: p.title.clone(),
                target_plural: target.plural.clone(),
            },
            None => DisplayField::Text {
                name: p.name.clone(),
                label: p.title.clone(),
            },
        }
    }
}

/// Field of the generated TypeScript type. List properties are projected as optional arrays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeField {
    pub name: String,
    pub ty: UiType,
    pub list: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityPage {
    pub name: String,
    pub plural: String,
    pub title: String,
    /// Every declared property, including lists.
    pub type_fields: Vec<TypeField>,
    pub form_fields: Vec<FormField>,
    pub display_fields: Vec<DisplayField>,
}

impl EntityPage {
    pub fn for_entity(entity: &ResolvedEntity) -> Self {
        EntityPage {
            name: entity.name.clone(),
            plural: entity.plural.clone(),
            title: entity.title.clone(),
            type_fields: entity
                .properties
                .iter()
                .map(|p| TypeField {
                    name: p.name.clone(),
                    ty: p.ty.ui_type(),
                    list: p.list,
                })
                .collect(),
            form_fields: entity
                .persisted()
                .map(|p| FormField {
                    name: p.name.clone(),
                    label: p.title.clone(),
                    input: if p.ty.is_numeric() {
                        InputKind::Number
                    } else {
                        InputKind::Text
                    },
                })
                .collect(),
            display_fields: entity.persisted().map(DisplayField::for_property).collect(),
        }
    }

    pub fn collection_path(&self) -> String {
        format!("{}/{}/page.tsx", APP_DIR, self.plural)
    }

    pub fn detail_path(&self) -> String {
        format!("{}/{}/[id]/page.tsx", APP_DIR, self.plural)
    }

    pub fn has_links(&self) -> bool {
        self.display_fields
            .iter()
            .any(|d| matches!(d, DisplayField::Link { .. }))
    }
}

/// Double-quoted JS string literal.
pub(crate) fn js_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            c => push_js_char(&mut out, c),
        }
    }
    out.push('"');
    out
}

/// Escape text placed inside a JS template literal.
pub(crate) fn js_template_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            c => push_js_char(&mut out, c),
        }
    }
    out
}

/// Backslash and control characters, shared by both literal forms.
fn push_js_char(out: &mut String, c: char) {
    match c {
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
        c => out.push(c),
    }
}

pub fn compile_frontend(model: &ResolvedModel, settings: &GeneratorSettings) -> Vec<Artifact> {
    let pages: Vec<EntityPage> = model.entities.iter().map(EntityPage::for_entity).collect();
    let api_base = settings.api_base();

    let mut artifacts = Vec::with_capacity(pages.len() * 2 + 1);
    artifacts.push(Artifact::new(
        format!("{}/page.tsx", APP_DIR),
        IndexPage { pages: &pages }.to_string(),
    ));
    for page in &pages {
        tracing::debug!(entity = %page.name, fields = page.form_fields.len(), "frontend pages");
        artifacts.push(Artifact::new(
            page.collection_path(),
            CollectionPage { page, api_base }.to_string(),
        ));
        artifacts.push(Artifact::new(
            page.detail_path(),
            DetailPage { page, api_base }.to_string(),
        ));
    }
    artifacts
}
