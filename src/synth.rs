//! Page and component synthesis.
//!
//! Stage 2 of the conversion pipeline. Each page runs through the markup
//! rules in a fixed order:
//!
//! 1. **Sanitize**: drop the document shell, stylesheet links, external scripts
//! 2. **Hoist**: move inline `<script>` bodies into the page script
//! 3. **Extract**: pull out each configured region (`nav`, `footer`, …) and
//!    register it as a shared component
//! 4. **Rewrite**: links to navigation elements, known `onclick` handlers to
//!    click bindings
//!
//! Preparation is sequential because the [`ComponentRegistry`] keeps the
//! first occurrence of each region. Once every page is prepared the registry
//! is frozen and pages can be rendered and written in any order.
//!
//! A region that cannot be extracted (opened but never closed) does not fail
//! the page: the fragment is left as it was and a [`TransformFallback`] is
//! recorded.

use crate::config::{ComponentsConfig, StylePolicy};
use crate::framework::{FrameworkProfile, PageView, StyleBlock};
use crate::markup::{Extraction, MarkupRewriter};
use crate::naming::component_name;
use crate::types::{AssociatedAsset, ComponentUnit, ExtractedRegion, PageUnit};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Shared components by lowercased tag. The first registration of a tag wins.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    components: BTreeMap<String, ComponentUnit>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Promote `region` to a component unless its tag is already taken.
    ///
    /// Returns `true` when the region became the component.
    pub fn register(&mut self, region: &ExtractedRegion, page: &str) -> bool {
        if self.components.contains_key(&region.tag) {
            return false;
        }
        debug!(tag = %region.tag, page, "promoted region to component");
        self.components.insert(
            region.tag.clone(),
            ComponentUnit {
                name: component_name(&region.tag),
                tag: region.tag.clone(),
                template: region.rewritten.clone(),
                first_page: page.to_string(),
            },
        );
        true
    }

    pub fn get(&self, tag: &str) -> Option<&ComponentUnit> {
        self.components.get(&tag.to_ascii_lowercase())
    }

    /// Components ordered by tag.
    pub fn components(&self) -> impl Iterator<Item = &ComponentUnit> {
        self.components.values()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// A region extraction that failed and was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformFallback {
    pub page: String,
    pub tag: String,
    pub reason: String,
}

/// A page after all markup rules ran, ready to render.
#[derive(Debug, Clone)]
pub struct PreparedPage {
    pub base_name: String,
    pub source: String,
    pub markup: String,
    /// Associated script files followed by hoisted inline scripts.
    pub script: String,
    pub stylesheets: Vec<AssociatedAsset>,
    /// Lowercased tags of the regions this page contained.
    pub regions: Vec<String>,
}

/// Run the markup rules over one page, registering its regions.
pub fn prepare_page(
    page: &PageUnit,
    rewriter: &dyn MarkupRewriter,
    components: &ComponentsConfig,
    registry: &mut ComponentRegistry,
) -> (PreparedPage, Vec<TransformFallback>) {
    let sanitized = rewriter.sanitize(&page.markup);
    let (mut body, hoisted) = rewriter.hoist_scripts(&sanitized);

    let script_parts: Vec<String> = page.script().into_iter().chain(hoisted).collect();
    let script = script_parts.join("\n\n");
    let known = rewriter.function_names(&script);

    let mut regions = Vec::new();
    let mut fallbacks = Vec::new();
    for tag in components.tags() {
        match rewriter.extract(&body, tag) {
            Ok(Extraction {
                remainder,
                region: Some(region),
            }) => {
                body = remainder;
                registry.register(&region, &page.base_name);
                regions.push(region.tag);
            }
            Ok(Extraction { region: None, .. }) => {}
            Err(e) => {
                warn!(page = %page.base_name, tag, error = %e, "region left in place");
                fallbacks.push(TransformFallback {
                    page: page.base_name.clone(),
                    tag: tag.to_ascii_lowercase(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let body = rewriter.rewrite_links(&body);
    let body = rewriter.rewrite_events(&body, &known);
    debug!(
        page = %page.base_name,
        regions = regions.len(),
        handlers = known.len(),
        "prepared page"
    );

    (
        PreparedPage {
            base_name: page.base_name.clone(),
            source: page.source.clone(),
            markup: body,
            script,
            stylesheets: page.stylesheets.clone(),
            regions,
        },
        fallbacks,
    )
}

/// Assemble the render input for a prepared page.
///
/// Only regions the page itself contained are referenced, in configured
/// order, using whichever page registered the component first.
pub fn page_view(
    page: &PreparedPage,
    registry: &ComponentRegistry,
    components: &ComponentsConfig,
    policy: StylePolicy,
) -> PageView {
    let references = |tags: &[String]| -> Vec<String> {
        tags.iter()
            .map(|t| t.to_ascii_lowercase())
            .filter(|t| page.regions.contains(t))
            .filter_map(|t| registry.get(&t).map(|c| c.name.clone()))
            .collect()
    };

    let style = match policy {
        StylePolicy::Inline => StyleBlock::Inline(
            page.stylesheets
                .iter()
                .map(|s| s.content.trim_end())
                .collect::<Vec<_>>()
                .join("\n\n"),
        ),
        StylePolicy::External => StyleBlock::External(
            page.stylesheets
                .iter()
                .map(|s| s.relative_path.clone())
                .collect(),
        ),
    };

    PageView {
        base_name: page.base_name.clone(),
        top: references(components.top.as_slice()),
        bottom: references(components.bottom.as_slice()),
        markup: page.markup.clone(),
        script: page.script.clone(),
        style,
    }
}

/// Write `contents` to `output_root/relative`, creating parent directories.
pub fn write_output(output_root: &Path, relative: &Path, contents: &str) -> std::io::Result<PathBuf> {
    let path = output_root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, contents)?;
    Ok(path)
}

/// Render and write one page file. Returns the path relative to the output root.
pub fn write_page(
    output_root: &Path,
    profile: &dyn FrameworkProfile,
    view: &PageView,
) -> std::io::Result<PathBuf> {
    let relative = profile.page_path(&view.base_name);
    write_output(output_root, &relative, &profile.render_page(view))?;
    Ok(relative)
}

/// Render and write every registered component. Returns relative paths.
pub fn write_components(
    output_root: &Path,
    profile: &dyn FrameworkProfile,
    registry: &ComponentRegistry,
) -> std::io::Result<Vec<PathBuf>> {
    registry
        .components()
        .map(|component| {
            let relative = profile.component_path(&component.name);
            write_output(output_root, &relative, &profile.render_component(component))?;
            Ok(relative)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::vue::VueProfile;
    use crate::markup::PatternRewriter;
    use crate::markup::tests::TEST_SYNTAX;
    use tempfile::TempDir;

    const NAV: &str = "<nav><a href=\"index.html\">Home</a> <a href=\"about.html\">About</a></nav>";

    fn unit(base_name: &str, markup: &str) -> PageUnit {
        PageUnit {
            base_name: base_name.to_string(),
            source: format!("{base_name}.html"),
            markup: markup.to_string(),
            stylesheets: vec![],
            scripts: vec![],
        }
    }

    fn asset(path: &str, content: &str) -> AssociatedAsset {
        AssociatedAsset {
            relative_path: path.to_string(),
            content: content.to_string(),
        }
    }

    fn prepare(page: &PageUnit, registry: &mut ComponentRegistry) -> (PreparedPage, Vec<TransformFallback>) {
        prepare_page(
            page,
            &PatternRewriter::new(TEST_SYNTAX),
            &ComponentsConfig::default(),
            registry,
        )
    }

    #[test]
    fn registry_first_registration_wins() {
        let mut registry = ComponentRegistry::new();
        let first = ExtractedRegion {
            tag: "nav".to_string(),
            raw: "<nav>1</nav>".to_string(),
            rewritten: "<nav>1</nav>".to_string(),
        };
        let second = ExtractedRegion {
            raw: "<nav>2</nav>".to_string(),
            rewritten: "<nav>2</nav>".to_string(),
            ..first.clone()
        };
        assert!(registry.register(&first, "index"));
        assert!(!registry.register(&second, "about"));

        let nav = registry.get("NAV").unwrap();
        assert_eq!(nav.name, "Nav");
        assert_eq!(nav.template, "<nav>1</nav>");
        assert_eq!(nav.first_page, "index");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn page_regions_become_components() {
        let mut registry = ComponentRegistry::new();
        let page = unit(
            "index",
            &format!("<!DOCTYPE html><html><head><title>x</title></head><body>{NAV}<main>Hi</main><footer>(c)</footer></body></html>"),
        );
        let (prepared, fallbacks) = prepare(&page, &mut registry);

        assert!(fallbacks.is_empty());
        assert_eq!(prepared.markup, "<main>Hi</main>");
        assert_eq!(prepared.regions, vec!["nav", "footer"]);
        assert_eq!(
            registry.get("nav").unwrap().template,
            "<nav><router-link to=\"/\">Home</router-link> <router-link to=\"/about\">About</router-link></nav>"
        );
        assert_eq!(registry.get("footer").unwrap().template, "<footer>(c)</footer>");
    }

    #[test]
    fn identical_regions_on_two_pages_share_one_component() {
        let mut registry = ComponentRegistry::new();
        let (index, _) = prepare(&unit("index", &format!("{NAV}<p>Home</p>")), &mut registry);
        let (about, _) = prepare(&unit("about", &format!("{NAV}<p>About</p>")), &mut registry);

        assert_eq!(registry.len(), 1);
        let config = ComponentsConfig::default();
        for page in [&index, &about] {
            let view = page_view(page, &registry, &config, StylePolicy::Inline);
            assert_eq!(view.top, vec!["Nav"]);
            assert!(view.bottom.is_empty());
        }
    }

    #[test]
    fn pages_without_a_region_do_not_reference_it() {
        let mut registry = ComponentRegistry::new();
        prepare(&unit("index", &format!("{NAV}<p>Home</p>")), &mut registry);
        let (contact, _) = prepare(&unit("contact", "<p>Contact</p>"), &mut registry);

        let view = page_view(&contact, &registry, &ComponentsConfig::default(), StylePolicy::Inline);
        assert!(view.top.is_empty());
    }

    #[test]
    fn known_handlers_are_bound() {
        let mut registry = ComponentRegistry::new();
        let mut page = unit(
            "index",
            "<button onclick=\"greet()\">Hi</button><button onclick=\"track('x')\">T</button>",
        );
        page.scripts.push(asset("index.js", "function greet() { alert('hi'); }"));

        let (prepared, _) = prepare(&page, &mut registry);
        assert_eq!(
            prepared.markup,
            "<button @click=\"greet\">Hi</button><button onclick=\"track('x')\">T</button>"
        );
        assert_eq!(prepared.script, "function greet() { alert('hi'); }");
    }

    #[test]
    fn inline_scripts_are_hoisted_and_bind_handlers() {
        let mut registry = ComponentRegistry::new();
        let mut page = unit(
            "about",
            "<button onclick=\"toggleBio()\">Bio</button>\n<script>\nfunction toggleBio() { bio = !bio; }\n</script>",
        );
        page.scripts.push(asset("about.js", "let bio = false;"));

        let (prepared, _) = prepare(&page, &mut registry);
        assert_eq!(prepared.markup, "<button @click=\"toggleBio\">Bio</button>\n");
        assert_eq!(prepared.script, "let bio = false;\n\nfunction toggleBio() { bio = !bio; }");
    }

    #[test]
    fn unterminated_region_falls_back() {
        let mut registry = ComponentRegistry::new();
        let page = unit("broken", "<nav><a href=\"about.html\">About</a>\n<p>Body</p>");

        let (prepared, fallbacks) = prepare(&page, &mut registry);
        assert!(registry.is_empty());
        assert_eq!(fallbacks.len(), 1);
        assert_eq!(fallbacks[0].tag, "nav");
        assert_eq!(fallbacks[0].page, "broken");
        assert_eq!(
            prepared.markup,
            "<nav><router-link to=\"/about\">About</router-link>\n<p>Body</p>"
        );
    }

    #[test]
    fn style_policy_shapes_the_style_block() {
        let mut registry = ComponentRegistry::new();
        let mut page = unit("about", "<p>x</p>");
        page.stylesheets.push(asset("style.css", "body {}\n"));
        page.stylesheets.push(asset("css/about.css", ".about {}"));
        let (prepared, _) = prepare(&page, &mut registry);
        let config = ComponentsConfig::default();

        let inline = page_view(&prepared, &registry, &config, StylePolicy::Inline);
        assert_eq!(inline.style, StyleBlock::Inline("body {}\n\n.about {}".to_string()));

        let external = page_view(&prepared, &registry, &config, StylePolicy::External);
        assert_eq!(
            external.style,
            StyleBlock::External(vec!["style.css".to_string(), "css/about.css".to_string()])
        );
    }

    #[test]
    fn writes_pages_and_components() {
        let tmp = TempDir::new().unwrap();
        let mut registry = ComponentRegistry::new();
        let (prepared, _) = prepare(&unit("index", &format!("{NAV}<p>Home</p>")), &mut registry);
        let view = page_view(&prepared, &registry, &ComponentsConfig::default(), StylePolicy::Inline);

        let page_path = write_page(tmp.path(), &VueProfile, &view).unwrap();
        let component_paths = write_components(tmp.path(), &VueProfile, &registry).unwrap();

        assert_eq!(page_path, PathBuf::from("src/pages/index.vue"));
        assert_eq!(component_paths, vec![PathBuf::from("src/components/Nav.vue")]);

        let page = fs::read_to_string(tmp.path().join(&page_path)).unwrap();
        assert!(page.contains("<Nav />"));
        assert!(page.contains("import Nav from '../components/Nav.vue';"));

        // Writing again over existing directories must not fail.
        write_page(tmp.path(), &VueProfile, &view).unwrap();
    }
}
